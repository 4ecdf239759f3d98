//! Engine facade
//!
//! The presentation layer drives the engine through `init`, `start`, `tick`,
//! `handle_tap` and `stop`, and reads back events and snapshots. Misordered
//! calls are logged and ignored so UI timing jitter cannot break a round.

use crate::error::{ConfigError, SoftError};
use crate::sim::{self, GameEvent, GameState, RoundPhase, Rules, Snapshot};
use crate::tuning::Tuning;

pub struct Engine {
    rules: Rules,
    state: GameState,
    initialized: bool,
}

impl Engine {
    /// Build an engine; malformed tuning fails here, before any round
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        let rules = Rules::from_tuning(tuning)?;
        Ok(Self {
            rules,
            state: GameState::new(seed),
            initialized: false,
        })
    }

    /// Prepare for rounds. Idempotent.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        log::info!(
            "Engine ready: {} glyphs, {} specials",
            self.rules.normals.entries().len(),
            self.rules.specials.entries().len()
        );
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Reset all state and begin the countdown for a `total_seconds` round
    pub fn start(&mut self, total_seconds: u32) {
        if !self.initialized {
            log::warn!("start() before init(); ignoring");
            return;
        }
        if total_seconds == 0 {
            log::warn!("start() with a zero-length round; ignoring");
            return;
        }
        sim::start_round(&mut self.state, &self.rules, total_seconds);
    }

    /// Start a round of the configured length
    pub fn start_default(&mut self) {
        self.start(self.rules.tuning.round_seconds);
    }

    /// One step of an external countdown timer
    pub fn countdown_step(&mut self) {
        if let Err(err) = sim::countdown_step(&mut self.state, &self.rules) {
            log_soft(err);
        }
    }

    /// Advance by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        if let Err(err) = sim::tick(&mut self.state, &self.rules, dt) {
            log_soft(err);
        }
    }

    /// Resolve a tap. Returns the outcome event when the tap landed.
    pub fn handle_tap(&mut self, drop_id: u32) -> Option<GameEvent> {
        match sim::resolve_hit(&mut self.state, &self.rules, drop_id) {
            Ok(event) => Some(event),
            Err(err) => {
                log_soft(err);
                None
            }
        }
    }

    /// Tear the round down: drops, timers, effects and pending events go.
    /// A running x2 leaves one `MultiplierChanged { active: false }` behind.
    pub fn stop(&mut self) {
        if self.state.phase != RoundPhase::Idle {
            log::info!("Round stopped");
        }
        self.state.clear_round();
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> RoundPhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }
}

/// Soft errors are expected under UI jitter (a tap racing a frame-driven
/// removal, a frame arriving after the round ended)
fn log_soft(err: SoftError) {
    log::debug!("{err}");
}
