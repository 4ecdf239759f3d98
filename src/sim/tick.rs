//! Round lifecycle and per-frame update
//!
//! Countdown(3) -> Running -> Ended. Within a Running frame the order is:
//! clock, status expiry, time drain, motion, spawn.

use super::motion::{speed_scale, update_drops};
use super::rules::Rules;
use super::spawn::spawn_due;
use super::state::{GameEvent, GameState, RoundPhase};
use crate::error::SoftError;

/// Reset all round state and begin the countdown
pub fn start_round(state: &mut GameState, rules: &Rules, total_seconds: u32) {
    state.clear_round();
    state.total_seconds = total_seconds;
    state.seconds_left = total_seconds as f32;

    let from = rules.tuning.countdown_from;
    if from == 0 {
        begin_running(state, rules);
        return;
    }
    state.phase = RoundPhase::Countdown { remaining: from };
    state.emit(GameEvent::CountdownTick { remaining: from });
    log::info!("Round of {}s: countdown from {}", total_seconds, from);
}

/// One step of the countdown timer. Returns true when the round starts.
pub fn countdown_step(state: &mut GameState, rules: &Rules) -> Result<bool, SoftError> {
    let RoundPhase::Countdown { remaining } = state.phase else {
        return Err(SoftError::LifecycleViolation {
            operation: "countdown_step",
            phase: state.phase,
        });
    };
    if remaining <= 1 {
        begin_running(state, rules);
        return Ok(true);
    }
    let remaining = remaining - 1;
    state.phase = RoundPhase::Countdown { remaining };
    state.emit(GameEvent::CountdownTick { remaining });
    Ok(false)
}

fn begin_running(state: &mut GameState, rules: &Rules) {
    state.seconds_left = state.total_seconds as f32;
    state.score = 0;
    state.effects = Default::default();
    state.clock = 0.0;
    state.countdown_elapsed = 0.0;
    state.drops.clear();
    state.next_spawn_at = rules.tuning.spawn.first_spawn_delay_ms / 1000.0;
    state.phase = RoundPhase::Running;
    state.emit(GameEvent::RoundStarted {
        total_seconds: state.total_seconds,
    });
    log::info!("Round running ({}s)", state.total_seconds);
}

fn end_round(state: &mut GameState) {
    state.seconds_left = 0.0;
    state.phase = RoundPhase::Ended;
    state.emit(GameEvent::RoundEnded {
        final_score: state.score,
    });
    log::info!("Round ended with score {}", state.score);
}

/// Advance the round by `dt` seconds.
///
/// Countdown only feeds the countdown timer. Idle and Ended are rejected as
/// soft lifecycle violations.
pub fn tick(state: &mut GameState, rules: &Rules, dt: f32) -> Result<(), SoftError> {
    let dt = dt.max(0.0);
    match state.phase {
        RoundPhase::Idle | RoundPhase::Ended => Err(SoftError::LifecycleViolation {
            operation: "tick",
            phase: state.phase,
        }),
        RoundPhase::Countdown { .. } => {
            let step = rules.tuning.countdown_step_seconds;
            state.countdown_elapsed += dt;
            while state.countdown_elapsed >= step {
                state.countdown_elapsed -= step;
                if countdown_step(state, rules)? {
                    break;
                }
            }
            Ok(())
        }
        RoundPhase::Running => {
            run_frame(state, rules, dt);
            Ok(())
        }
    }
}

fn run_frame(state: &mut GameState, rules: &Rules, dt: f32) {
    state.clock += dt;
    let now = state.clock;

    // Expiry first, so a lapsed x2 never touches this frame's spawns
    if state.effects.multiplier.expire(now) {
        state.emit(GameEvent::MultiplierChanged { active: false });
    }
    state.effects.frozen.expire(now);
    let frozen = state.is_frozen();

    let scale = speed_scale(
        state.total_seconds,
        state.seconds_left,
        rules.tuning.motion.accel_pct_by_end,
    );

    if !frozen {
        state.seconds_left = (state.seconds_left - dt).max(0.0);
    }
    if state.seconds_left <= 0.0 {
        end_round(state);
        return;
    }

    update_drops(state, &rules.tuning.playfield, dt, scale);
    spawn_due(state, rules);
}
