//! Emoji Drop - a timed falling-emoji arcade game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (spawning, motion, hits, round lifecycle)
//! - `engine`: Lifecycle facade consumed by the presentation layer
//! - `tuning`: Data-driven game balance (glyph tables, timings)
//! - `highscores`: Best-score store, updated at round end
//! - `error`: Configuration, soft and storage errors

pub mod engine;
pub mod error;
pub mod highscores;
pub mod sim;
pub mod tuning;

pub use engine::Engine;
pub use error::{ConfigError, SoftError, StoreError};
pub use highscores::BestScore;
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Round length in seconds
    pub const GAME_SECONDS: u32 = 30;
    /// Countdown before the round starts (3, 2, 1)
    pub const COUNTDOWN_FROM: u8 = 3;
    /// Seconds between countdown steps
    pub const COUNTDOWN_STEP_SECONDS: f32 = 1.0;

    /// Status effect durations
    pub const FREEZE_SECONDS: f32 = 5.0;
    pub const MULTIPLIER_SECONDS: f32 = 5.0;
    /// Seconds added by a time bonus pickup (uncapped)
    pub const TIMER_BONUS_SECONDS: f32 = 5.0;

    /// Score removed by a bomb (floored at zero)
    pub const BOMB_PENALTY: u64 = 100;
    /// Gain multiplier while the x2 effect is active
    pub const MULTIPLIER_FACTOR: u64 = 2;

    /// Spawn cadence
    pub const SPAWN_MIN_INTERVAL_MS: f32 = 250.0;
    pub const SPAWN_MAX_INTERVAL_MS: f32 = 450.0;
    pub const FIRST_SPAWN_DELAY_MS: f32 = 500.0;
    pub const SPAWN_MIN_BATCH: u32 = 1;
    pub const SPAWN_MAX_BATCH: u32 = 2;
    /// Live drop cap (extra spawns are skipped, not queued)
    pub const MAX_ALIVE: usize = 45;
    /// Probability that a spawn slot draws from the special table
    pub const SPECIAL_CHANCE: f32 = 0.20;

    /// Motion (pixels/s)
    pub const BASE_VY: f32 = 140.0;
    pub const VY_JITTER_MIN: f32 = 0.9;
    pub const VY_JITTER_MAX: f32 = 1.1;
    pub const JITTER_VX: f32 = 20.0;
    /// Fall speed gain reached at the end of the round (+35%)
    pub const ACCEL_PCT_BY_END: f32 = 0.35;

    /// Playfield (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 390.0;
    pub const PLAYFIELD_HEIGHT: f32 = 844.0;
    pub const PADDING_SIDE: f32 = 16.0;
    /// Spawn height, above the top edge
    pub const SPAWN_Y: f32 = -30.0;
    /// How far below the bottom edge a drop may fall before it is discarded
    pub const EXIT_MARGIN: f32 = 40.0;
}
