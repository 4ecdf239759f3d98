//! Drop spawning
//!
//! Batches arrive on a jittered cadence. Each slot draws a special with
//! `special_chance`, otherwise a normal glyph. Slots past `max_alive` are
//! skipped rather than queued.

use glam::Vec2;
use rand::Rng;

use super::rules::Rules;
use super::state::{DropKind, GameState};

/// Spawn a batch if one is due. Returns the number of drops created.
pub fn spawn_due(state: &mut GameState, rules: &Rules) -> usize {
    if !state.is_running() || state.is_frozen() || state.clock < state.next_spawn_at {
        return 0;
    }
    spawn_batch(state, rules)
}

/// Schedule the next batch and spawn this one
pub fn spawn_batch(state: &mut GameState, rules: &Rules) -> usize {
    let spawn = &rules.tuning.spawn;
    let between_ms = state
        .rng
        .random_range(spawn.min_interval_ms..=spawn.max_interval_ms);
    state.next_spawn_at = state.clock + between_ms / 1000.0;

    let batch = state.rng.random_range(spawn.min_batch..=spawn.max_batch);
    let mut spawned = 0;
    for _ in 0..batch {
        if state.drops.len() >= spawn.max_alive {
            log::debug!("Spawn skipped: {} drops alive", state.drops.len());
            break;
        }
        spawn_one(state, rules);
        spawned += 1;
    }
    spawned
}

/// Spawn a single drop above the top edge
pub fn spawn_one(state: &mut GameState, rules: &Rules) -> u32 {
    let (kind, glyph) = if state.rng.random_bool(rules.tuning.spawn.special_chance as f64) {
        let def = rules.specials.pick(&mut state.rng);
        (DropKind::from(def.kind), def.glyph.clone())
    } else {
        let def = rules.normals.pick(&mut state.rng);
        (DropKind::Normal { points: def.points }, def.glyph.clone())
    };

    let field = &rules.tuning.playfield;
    let motion = &rules.tuning.motion;
    let x = state
        .rng
        .random_range(field.padding_side..=field.width - field.padding_side);
    let vy = motion.base_vy
        * state
            .rng
            .random_range(motion.vy_jitter_min..=motion.vy_jitter_max);
    let vx = state.rng.random_range(-1.0f32..=1.0) * motion.jitter_vx;

    let id = state.push_drop(kind, glyph, Vec2::new(x, field.spawn_y), Vec2::new(vx, vy));
    log::trace!("Spawned drop {} {:?} at x={:.1}", id, kind, x);
    id
}
