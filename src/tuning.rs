//! Game balance tables and timings
//!
//! Loaded once at startup (JSON, missing fields fall back to the defaults in
//! [`crate::consts`]) and then frozen inside [`crate::sim::Rules`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::SpecialKind;

/// A plain scoring glyph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphDef {
    pub glyph: String,
    pub points: u32,
    /// Relative spawn weight
    pub weight: f32,
}

/// A special glyph (bomb, rocket, freeze, x2, time bonus)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialDef {
    pub glyph: String,
    pub kind: SpecialKind,
    pub weight: f32,
}

fn glyph(glyph: &str, points: u32, weight: f32) -> GlyphDef {
    GlyphDef {
        glyph: glyph.to_string(),
        points,
        weight,
    }
}

fn special(glyph: &str, kind: SpecialKind, weight: f32) -> SpecialDef {
    SpecialDef {
        glyph: glyph.to_string(),
        kind,
        weight,
    }
}

/// Default normal glyph table
pub fn default_glyphs() -> Vec<GlyphDef> {
    vec![
        glyph("😀", 1, 30.0),
        glyph("😺", 2, 20.0),
        glyph("🍀", 3, 18.0),
        glyph("🍎", 4, 16.0),
        glyph("🍩", 5, 14.0),
        glyph("🪙", 8, 12.0),
        glyph("💎", 15, 8.0),
        glyph("🎯", 20, 6.0),
        glyph("👑", 30, 4.0),
        glyph("🧠", 30, 3.0),
        glyph("🧨", 50, 1.0),
        glyph("🧿", 50, 1.0),
    ]
}

/// Default special glyph table
pub fn default_specials() -> Vec<SpecialDef> {
    vec![
        special("💣", SpecialKind::Bomb, 14.0),
        special("❄️", SpecialKind::Freeze, 9.0),
        special("🚀", SpecialKind::Rocket, 3.0),
        special("⭐", SpecialKind::Multiplier, 5.0),
        special("⏱️", SpecialKind::TimeBonus, 3.0),
    ]
}

/// Spawn cadence and backpressure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub min_interval_ms: f32,
    pub max_interval_ms: f32,
    /// Delay between round start and the first batch
    pub first_spawn_delay_ms: f32,
    pub min_batch: u32,
    pub max_batch: u32,
    pub max_alive: usize,
    pub special_chance: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            min_interval_ms: SPAWN_MIN_INTERVAL_MS,
            max_interval_ms: SPAWN_MAX_INTERVAL_MS,
            first_spawn_delay_ms: FIRST_SPAWN_DELAY_MS,
            min_batch: SPAWN_MIN_BATCH,
            max_batch: SPAWN_MAX_BATCH,
            max_alive: MAX_ALIVE,
            special_chance: SPECIAL_CHANCE,
        }
    }
}

/// Fall speed and drift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionTuning {
    pub base_vy: f32,
    pub vy_jitter_min: f32,
    pub vy_jitter_max: f32,
    pub jitter_vx: f32,
    pub accel_pct_by_end: f32,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            base_vy: BASE_VY,
            vy_jitter_min: VY_JITTER_MIN,
            vy_jitter_max: VY_JITTER_MAX,
            jitter_vx: JITTER_VX,
            accel_pct_by_end: ACCEL_PCT_BY_END,
        }
    }
}

/// Playfield geometry, y grows downward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
    pub padding_side: f32,
    pub spawn_y: f32,
    pub exit_margin: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            padding_side: PADDING_SIDE,
            spawn_y: SPAWN_Y,
            exit_margin: EXIT_MARGIN,
        }
    }
}

impl Playfield {
    /// y beyond which a drop has left the field
    pub fn exit_y(&self) -> f32 {
        self.height + self.exit_margin
    }
}

/// Complete game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub round_seconds: u32,
    pub countdown_from: u8,
    /// Seconds per countdown step when `tick` drives the countdown
    pub countdown_step_seconds: f32,
    pub freeze_seconds: f32,
    pub multiplier_seconds: f32,
    pub timer_bonus_seconds: f32,
    pub bomb_penalty: u64,
    pub multiplier_factor: u64,
    pub spawn: SpawnTuning,
    pub motion: MotionTuning,
    pub playfield: Playfield,
    pub glyphs: Vec<GlyphDef>,
    pub specials: Vec<SpecialDef>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            round_seconds: GAME_SECONDS,
            countdown_from: COUNTDOWN_FROM,
            countdown_step_seconds: COUNTDOWN_STEP_SECONDS,
            freeze_seconds: FREEZE_SECONDS,
            multiplier_seconds: MULTIPLIER_SECONDS,
            timer_bonus_seconds: TIMER_BONUS_SECONDS,
            bomb_penalty: BOMB_PENALTY,
            multiplier_factor: MULTIPLIER_FACTOR,
            spawn: SpawnTuning::default(),
            motion: MotionTuning::default(),
            playfield: Playfield::default(),
            glyphs: default_glyphs(),
            specials: default_specials(),
        }
    }
}

fn check_range(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if !(min.is_finite() && max.is_finite()) || min < 0.0 || min > max {
        return Err(ConfigError::InvalidRange { field, min, max });
    }
    Ok(())
}

fn check_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::OutOfBounds {
            field,
            expected: ">= 0",
            value,
        });
    }
    Ok(())
}

impl Tuning {
    /// Parse tuning from JSON text
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check scalar fields (tables are checked when compiled into weighted tables)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.round_seconds == 0 {
            return Err(ConfigError::OutOfBounds {
                field: "round_seconds",
                expected: "> 0",
                value: 0.0,
            });
        }
        if self.multiplier_factor == 0 {
            return Err(ConfigError::OutOfBounds {
                field: "multiplier_factor",
                expected: ">= 1",
                value: 0.0,
            });
        }
        if !(self.countdown_step_seconds.is_finite() && self.countdown_step_seconds > 0.0) {
            return Err(ConfigError::OutOfBounds {
                field: "countdown_step_seconds",
                expected: "> 0",
                value: self.countdown_step_seconds,
            });
        }
        check_non_negative("freeze_seconds", self.freeze_seconds)?;
        check_non_negative("multiplier_seconds", self.multiplier_seconds)?;
        check_non_negative("timer_bonus_seconds", self.timer_bonus_seconds)?;

        let spawn = &self.spawn;
        check_range(
            "spawn.interval_ms",
            spawn.min_interval_ms,
            spawn.max_interval_ms,
        )?;
        check_non_negative("spawn.first_spawn_delay_ms", spawn.first_spawn_delay_ms)?;
        check_range(
            "spawn.batch",
            spawn.min_batch as f32,
            spawn.max_batch as f32,
        )?;
        if !(0.0..=1.0).contains(&spawn.special_chance) {
            return Err(ConfigError::OutOfBounds {
                field: "spawn.special_chance",
                expected: "[0, 1]",
                value: spawn.special_chance,
            });
        }

        let motion = &self.motion;
        check_non_negative("motion.base_vy", motion.base_vy)?;
        check_range("motion.vy_jitter", motion.vy_jitter_min, motion.vy_jitter_max)?;
        check_non_negative("motion.jitter_vx", motion.jitter_vx)?;
        check_non_negative("motion.accel_pct_by_end", motion.accel_pct_by_end)?;

        let field = &self.playfield;
        check_range(
            "playfield.spawn_span",
            field.padding_side,
            field.width - field.padding_side,
        )?;
        if !(field.height.is_finite() && field.height > 0.0) {
            return Err(ConfigError::OutOfBounds {
                field: "playfield.height",
                expected: "> 0",
                value: field.height,
            });
        }
        check_non_negative("playfield.exit_margin", field.exit_margin)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.glyphs.len(), 12);
        assert_eq!(tuning.specials.len(), 5);
        assert_eq!(tuning.round_seconds, 30);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let tuning = Tuning::from_json(r#"{ "round_seconds": 60, "spawn": { "max_alive": 10 } }"#)
            .unwrap();
        assert_eq!(tuning.round_seconds, 60);
        assert_eq!(tuning.spawn.max_alive, 10);
        assert_eq!(tuning.spawn.min_batch, SPAWN_MIN_BATCH);
        assert_eq!(tuning.glyphs, default_glyphs());
    }

    #[test]
    fn test_special_kind_names() {
        let tuning = Tuning::from_json(
            r#"{ "specials": [ { "glyph": "⭐", "kind": "mult", "weight": 1 },
                               { "glyph": "⏱️", "kind": "time", "weight": 2 } ] }"#,
        )
        .unwrap();
        assert_eq!(tuning.specials[0].kind, SpecialKind::Multiplier);
        assert_eq!(tuning.specials[1].kind, SpecialKind::TimeBonus);
    }

    #[test]
    fn test_inverted_interval_rejected() {
        let mut tuning = Tuning::default();
        tuning.spawn.min_interval_ms = 500.0;
        tuning.spawn.max_interval_ms = 100.0;
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::InvalidRange {
                field: "spawn.interval_ms",
                ..
            })
        ));
    }

    #[test]
    fn test_bad_special_chance_rejected() {
        let mut tuning = Tuning::default();
        tuning.spawn.special_chance = 1.5;
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_zero_round_rejected() {
        let mut tuning = Tuning::default();
        tuning.round_seconds = 0;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_countdown_step_configurable() {
        let tuning = Tuning::from_json(r#"{ "countdown_step_seconds": 0.5 }"#).unwrap();
        assert_eq!(tuning.countdown_step_seconds, 0.5);
        assert_eq!(tuning.countdown_from, COUNTDOWN_FROM);

        let mut tuning = Tuning::default();
        tuning.countdown_step_seconds = 0.0;
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::OutOfBounds {
                field: "countdown_step_seconds",
                ..
            })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Tuning::load(Path::new("/nonexistent/tuning.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
