//! Drop simulation
//!
//! All gameplay decisions live here. Rules:
//! - One frame update path (`tick`), taps resolved between frames
//! - Injected, seedable RNG only
//! - Drops kept in spawn order, ids never reused
//! - No rendering, audio or storage dependencies

pub mod hit;
pub mod motion;
pub mod rules;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod weighted;

pub use hit::resolve_hit;
pub use motion::{speed_scale, update_drops};
pub use rules::Rules;
pub use spawn::{spawn_batch, spawn_due, spawn_one};
pub use state::{
    DropKind, FallingDrop, GameEvent, GameState, RoundPhase, Snapshot, SpecialKind, StatusEffect,
    StatusEffects,
};
pub use tick::{countdown_step, start_round, tick};
pub use weighted::{WeightedEntry, WeightedTable};
