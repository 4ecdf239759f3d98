//! Game state and core simulation types
//!
//! Everything a round mutates lives in [`GameState`]; presentation code only
//! reads [`GameEvent`]s and [`Snapshot`]s.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Lifecycle of one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No round (before the first start, or after stop)
    Idle,
    /// Pre-round countdown, `remaining` steps left (3, 2, 1)
    Countdown { remaining: u8 },
    /// Active gameplay
    Running,
    /// Time ran out; the score is final
    Ended,
}

/// Special glyph kinds, as named in tuning files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialKind {
    Bomb,
    Rocket,
    Freeze,
    #[serde(rename = "mult")]
    Multiplier,
    #[serde(rename = "time")]
    TimeBonus,
}

/// What a drop does when tapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropKind {
    Normal { points: u32 },
    Bomb,
    Rocket,
    Freeze,
    Multiplier,
    TimeBonus,
}

impl DropKind {
    pub fn is_normal(&self) -> bool {
        matches!(self, DropKind::Normal { .. })
    }

    /// Point value; zero for specials
    pub fn points(&self) -> u32 {
        match self {
            DropKind::Normal { points } => *points,
            _ => 0,
        }
    }
}

impl From<SpecialKind> for DropKind {
    fn from(kind: SpecialKind) -> Self {
        match kind {
            SpecialKind::Bomb => DropKind::Bomb,
            SpecialKind::Rocket => DropKind::Rocket,
            SpecialKind::Freeze => DropKind::Freeze,
            SpecialKind::Multiplier => DropKind::Multiplier,
            SpecialKind::TimeBonus => DropKind::TimeBonus,
        }
    }
}

/// A falling glyph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingDrop {
    pub id: u32,
    pub kind: DropKind,
    /// Display glyph, for the presentation layer only
    pub glyph: String,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl FallingDrop {
    pub fn points(&self) -> u32 {
        self.kind.points()
    }
}

/// A time-boxed flag; `active_until` is on the round clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub active_until: Option<f32>,
}

impl StatusEffect {
    pub fn is_active(&self, now: f32) -> bool {
        self.active_until.is_some_and(|until| now < until)
    }

    /// Extend to `max(current, now + duration)`; never shortens
    pub fn activate(&mut self, now: f32, duration: f32) {
        let until = now + duration;
        self.active_until = Some(match self.active_until {
            Some(current) => current.max(until),
            None => until,
        });
    }

    /// Clear a lapsed effect. Returns true if it was set and has now expired.
    pub fn expire(&mut self, now: f32) -> bool {
        match self.active_until {
            Some(until) if now >= until => {
                self.active_until = None;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.active_until = None;
    }
}

/// Frozen halts motion, spawning and the clock; Multiplier scales gains
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusEffects {
    pub frozen: StatusEffect,
    pub multiplier: StatusEffect,
}

/// Outcome events for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    CountdownTick { remaining: u8 },
    RoundStarted { total_seconds: u32 },
    ScoreChanged { delta: u64, total: u64 },
    BombTriggered { total: u64 },
    RocketTriggered { gain: u64, total: u64 },
    FreezeActivated { seconds: f32 },
    MultiplierChanged { active: bool },
    TimerBonusTriggered { seconds_left: f32 },
    RoundEnded { final_score: u64 },
}

/// Read-only view of the round for HUD code
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: RoundPhase,
    pub score: u64,
    pub total_seconds: u32,
    pub seconds_left: f32,
    /// Whole seconds as the HUD shows them (rounded up)
    pub display_seconds: u32,
    pub frozen: bool,
    pub multiplier: bool,
    pub drops: Vec<FallingDrop>,
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: RoundPhase,
    pub total_seconds: u32,
    pub seconds_left: f32,
    pub score: u64,
    /// Seconds since the round entered Running; keeps advancing while frozen
    pub clock: f32,
    /// Live drops in spawn order
    pub drops: Vec<FallingDrop>,
    pub effects: StatusEffects,
    /// Round clock time of the next spawn batch
    pub next_spawn_at: f32,
    /// Time accumulated toward the next countdown step
    pub countdown_elapsed: f32,
    pub rng: Pcg32,
    events: Vec<GameEvent>,
    /// Next drop id; never reset, so ids stay unique across rounds
    next_id: u32,
}

impl GameState {
    /// Create an idle state with a seeded RNG
    pub fn new(seed: u64) -> Self {
        Self {
            phase: RoundPhase::Idle,
            total_seconds: 0,
            seconds_left: 0.0,
            score: 0,
            clock: 0.0,
            drops: Vec::new(),
            effects: StatusEffects::default(),
            next_spawn_at: 0.0,
            countdown_elapsed: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new drop id
    pub fn next_drop_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a drop and return its id
    pub fn push_drop(&mut self, kind: DropKind, glyph: impl Into<String>, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_drop_id();
        self.drops.push(FallingDrop {
            id,
            kind,
            glyph: glyph.into(),
            pos,
            vel,
        });
        id
    }

    pub fn drop_by_id(&self, id: u32) -> Option<&FallingDrop> {
        self.drops.iter().find(|d| d.id == id)
    }

    /// Remove a drop, returning it if it was live
    pub fn remove_drop(&mut self, id: u32) -> Option<FallingDrop> {
        let index = self.drops.iter().position(|d| d.id == id)?;
        Some(self.drops.remove(index))
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    pub fn is_frozen(&self) -> bool {
        self.effects.frozen.is_active(self.clock)
    }

    pub fn multiplier_active(&self) -> bool {
        self.effects.multiplier.is_active(self.clock)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Drop everything a round owns; the id counter and RNG carry on.
    /// An x2 still running is reported as lapsed so listeners never keep a
    /// stale badge.
    pub fn clear_round(&mut self) {
        let had_multiplier = self.multiplier_active();
        self.phase = RoundPhase::Idle;
        self.total_seconds = 0;
        self.seconds_left = 0.0;
        self.score = 0;
        self.clock = 0.0;
        self.drops.clear();
        self.effects = StatusEffects::default();
        self.next_spawn_at = 0.0;
        self.countdown_elapsed = 0.0;
        self.events.clear();
        if had_multiplier {
            self.emit(GameEvent::MultiplierChanged { active: false });
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            total_seconds: self.total_seconds,
            seconds_left: self.seconds_left,
            display_seconds: self.seconds_left.max(0.0).ceil() as u32,
            frozen: self.is_frozen(),
            multiplier: self.multiplier_active(),
            drops: self.drops.clone(),
        }
    }
}
