//! Drop motion

use super::state::GameState;
use crate::tuning::Playfield;

/// Fall speed factor: ramps from 1 at round start to `1 + accel_pct` at the end
pub fn speed_scale(total_seconds: u32, seconds_left: f32, accel_pct: f32) -> f32 {
    if total_seconds == 0 {
        return 1.0;
    }
    let elapsed_fraction = 1.0 - seconds_left / total_seconds as f32;
    1.0 + elapsed_fraction * accel_pct
}

/// Advance every live drop by `dt`, then discard drops past the bottom edge.
///
/// Does nothing while frozen: drops hang where they are. Returns the number
/// of drops discarded (no score, no event).
pub fn update_drops(state: &mut GameState, field: &Playfield, dt: f32, speed_scale: f32) -> usize {
    if state.is_frozen() {
        return 0;
    }
    for drop in &mut state.drops {
        drop.pos.x += drop.vel.x * dt;
        drop.pos.y += drop.vel.y * dt * speed_scale;
    }

    let exit_y = field.exit_y();
    let before = state.drops.len();
    state.drops.retain(|d| d.pos.y <= exit_y);
    before - state.drops.len()
}
