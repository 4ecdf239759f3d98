//! Tap resolution
//!
//! One tap resolves exactly one drop kind and emits exactly one event.
//! Multiplier scales gains (normal, rocket) but never the bomb penalty.

use super::rules::Rules;
use super::state::{DropKind, GameEvent, GameState};
use crate::error::SoftError;

/// Resolve a tap on `drop_id`. The emitted event is queued and also returned.
pub fn resolve_hit(state: &mut GameState, rules: &Rules, drop_id: u32) -> Result<GameEvent, SoftError> {
    if !state.is_running() {
        return Err(SoftError::LifecycleViolation {
            operation: "handle_tap",
            phase: state.phase,
        });
    }
    let drop = state
        .remove_drop(drop_id)
        .ok_or(SoftError::InvalidTap(drop_id))?;

    let tuning = &rules.tuning;
    let factor = if state.multiplier_active() {
        tuning.multiplier_factor
    } else {
        1
    };
    let now = state.clock;

    let event = match drop.kind {
        DropKind::Normal { points } => {
            let delta = points as u64 * factor;
            state.score += delta;
            GameEvent::ScoreChanged {
                delta,
                total: state.score,
            }
        }
        DropKind::Bomb => {
            state.score = state.score.saturating_sub(tuning.bomb_penalty);
            GameEvent::BombTriggered { total: state.score }
        }
        DropKind::Rocket => {
            let collected: u64 = state
                .drops
                .iter()
                .filter(|d| d.kind.is_normal())
                .map(|d| d.points() as u64)
                .sum();
            state.drops.retain(|d| !d.kind.is_normal());
            let gain = collected * factor;
            state.score += gain;
            GameEvent::RocketTriggered {
                gain,
                total: state.score,
            }
        }
        DropKind::Freeze => {
            state.effects.frozen.activate(now, tuning.freeze_seconds);
            GameEvent::FreezeActivated {
                seconds: tuning.freeze_seconds,
            }
        }
        DropKind::Multiplier => {
            state
                .effects
                .multiplier
                .activate(now, tuning.multiplier_seconds);
            GameEvent::MultiplierChanged { active: true }
        }
        DropKind::TimeBonus => {
            state.seconds_left += tuning.timer_bonus_seconds;
            GameEvent::TimerBonusTriggered {
                seconds_left: state.seconds_left,
            }
        }
    };

    log::debug!("Hit drop {} ({:?}) -> {:?}", drop.id, drop.kind, event);
    state.emit(event.clone());
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::RoundPhase;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn rules() -> Rules {
        Rules::from_tuning(Tuning::default()).unwrap()
    }

    fn running_state() -> GameState {
        let mut state = GameState::new(42);
        state.phase = RoundPhase::Running;
        state.total_seconds = 30;
        state.seconds_left = 30.0;
        state
    }

    fn add(state: &mut GameState, kind: DropKind) -> u32 {
        state.push_drop(kind, "?", Vec2::new(100.0, 100.0), Vec2::new(0.0, 140.0))
    }

    #[test]
    fn test_normal_hit_scores() {
        let rules = rules();
        let mut state = running_state();
        let id = add(&mut state, DropKind::Normal { points: 8 });

        let event = resolve_hit(&mut state, &rules, id).unwrap();
        assert_eq!(event, GameEvent::ScoreChanged { delta: 8, total: 8 });
        assert!(state.drops.is_empty());
        assert_eq!(state.drain_events(), vec![event]);
    }

    #[test]
    fn test_normal_hit_doubled_by_multiplier() {
        let rules = rules();
        let mut state = running_state();
        state.score = 10;
        let mult = add(&mut state, DropKind::Multiplier);
        let normal = add(&mut state, DropKind::Normal { points: 5 });

        assert_eq!(
            resolve_hit(&mut state, &rules, mult).unwrap(),
            GameEvent::MultiplierChanged { active: true }
        );
        assert_eq!(
            resolve_hit(&mut state, &rules, normal).unwrap(),
            GameEvent::ScoreChanged { delta: 10, total: 20 }
        );
    }

    #[test]
    fn test_repeated_multiplier_caps_at_double() {
        let rules = rules();
        let mut state = running_state();
        for _ in 0..3 {
            let id = add(&mut state, DropKind::Multiplier);
            resolve_hit(&mut state, &rules, id).unwrap();
            state.clock += 1.0;
        }
        // Last activation at clock 2.0 wins the deadline
        assert_eq!(state.effects.multiplier.active_until, Some(7.0));

        let id = add(&mut state, DropKind::Normal { points: 4 });
        assert_eq!(
            resolve_hit(&mut state, &rules, id).unwrap(),
            GameEvent::ScoreChanged { delta: 8, total: 8 }
        );
    }

    #[test]
    fn test_bomb_floors_at_zero() {
        let rules = rules();
        let mut state = running_state();
        state.score = 30;
        let id = add(&mut state, DropKind::Bomb);
        assert_eq!(
            resolve_hit(&mut state, &rules, id).unwrap(),
            GameEvent::BombTriggered { total: 0 }
        );
    }

    #[test]
    fn test_bomb_penalty_not_multiplied() {
        let rules = rules();
        let mut state = running_state();
        state.score = 250;
        state.effects.multiplier.activate(0.0, 5.0);
        let id = add(&mut state, DropKind::Bomb);
        assert_eq!(
            resolve_hit(&mut state, &rules, id).unwrap(),
            GameEvent::BombTriggered { total: 150 }
        );
    }

    #[test]
    fn test_rocket_collects_all_normals() {
        let rules = rules();
        let mut state = running_state();
        add(&mut state, DropKind::Normal { points: 3 });
        add(&mut state, DropKind::Normal { points: 5 });
        let bomb = add(&mut state, DropKind::Bomb);
        add(&mut state, DropKind::Normal { points: 2 });
        let rocket = add(&mut state, DropKind::Rocket);

        let event = resolve_hit(&mut state, &rules, rocket).unwrap();
        assert_eq!(event, GameEvent::RocketTriggered { gain: 10, total: 10 });
        assert_eq!(state.drops.len(), 1);
        assert_eq!(state.drops[0].id, bomb);
    }

    #[test]
    fn test_rocket_doubled_by_multiplier() {
        let rules = rules();
        let mut state = running_state();
        state.effects.multiplier.activate(0.0, 5.0);
        add(&mut state, DropKind::Normal { points: 3 });
        add(&mut state, DropKind::Normal { points: 4 });
        let rocket = add(&mut state, DropKind::Rocket);
        assert_eq!(
            resolve_hit(&mut state, &rules, rocket).unwrap(),
            GameEvent::RocketTriggered { gain: 14, total: 14 }
        );
    }

    #[test]
    fn test_rocket_with_no_normals() {
        let rules = rules();
        let mut state = running_state();
        let freeze = add(&mut state, DropKind::Freeze);
        let rocket = add(&mut state, DropKind::Rocket);
        assert_eq!(
            resolve_hit(&mut state, &rules, rocket).unwrap(),
            GameEvent::RocketTriggered { gain: 0, total: 0 }
        );
        assert!(state.drop_by_id(freeze).is_some());
    }

    #[test]
    fn test_freeze_activates_and_extends() {
        let rules = rules();
        let mut state = running_state();
        state.clock = 2.0;
        let id = add(&mut state, DropKind::Freeze);
        assert_eq!(
            resolve_hit(&mut state, &rules, id).unwrap(),
            GameEvent::FreezeActivated { seconds: 5.0 }
        );
        assert!(state.is_frozen());
        assert_eq!(state.effects.frozen.active_until, Some(7.0));

        state.clock = 4.0;
        let id = add(&mut state, DropKind::Freeze);
        resolve_hit(&mut state, &rules, id).unwrap();
        assert_eq!(state.effects.frozen.active_until, Some(9.0));
    }

    #[test]
    fn test_time_bonus_uncapped() {
        let rules = rules();
        let mut state = running_state();
        let id = add(&mut state, DropKind::TimeBonus);
        assert_eq!(
            resolve_hit(&mut state, &rules, id).unwrap(),
            GameEvent::TimerBonusTriggered { seconds_left: 35.0 }
        );
        assert!(state.seconds_left > state.total_seconds as f32);
    }

    #[test]
    fn test_unknown_drop_is_soft_error() {
        let rules = rules();
        let mut state = running_state();
        let id = add(&mut state, DropKind::Normal { points: 1 });
        resolve_hit(&mut state, &rules, id).unwrap();
        state.drain_events();

        assert_eq!(resolve_hit(&mut state, &rules, id), Err(SoftError::InvalidTap(id)));
        assert_eq!(state.score, 1);
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_tap_outside_running_is_ignored() {
        let rules = rules();
        let mut state = running_state();
        let id = add(&mut state, DropKind::Normal { points: 1 });
        state.phase = RoundPhase::Ended;

        let err = resolve_hit(&mut state, &rules, id).unwrap_err();
        assert!(matches!(err, SoftError::LifecycleViolation { .. }));
        assert_eq!(state.drops.len(), 1);
        assert_eq!(state.score, 0);
    }

    proptest! {
        #[test]
        fn prop_score_never_negative(
            taps in prop::collection::vec(prop_oneof![Just(None), (1u32..60).prop_map(Some)], 1..60),
        ) {
            let rules = rules();
            let mut state = running_state();
            for tap in taps {
                let kind = match tap {
                    Some(points) => DropKind::Normal { points },
                    None => DropKind::Bomb,
                };
                let id = add(&mut state, kind);
                let before = state.score;
                let event = resolve_hit(&mut state, &rules, id).unwrap();
                if let GameEvent::BombTriggered { total } = event {
                    prop_assert_eq!(total, before.saturating_sub(100));
                }
            }
            prop_assert!(state.drops.is_empty());
        }
    }
}
