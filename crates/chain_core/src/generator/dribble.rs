use super::ActionGenerator;
use crate::chain::{ActionStatePair, CooperativeAction, PredictState, SafetyLevel};
use crate::geom::{self, Vec2};
use crate::world::WorldSnapshot;
use std::rc::Rc;

/// Short dribbles in evenly spaced directions.
#[derive(Debug, Clone)]
pub struct DribbleGenerator {
    pub direction_count: usize,
    /// Dribble lengths to try (m).
    pub lengths: Vec<f64>,
    /// Player dash speed while dribbling (m/cycle).
    pub dribble_speed: f64,
    /// 상대가 이 거리 안에 있으면 드리블 불가 (m)
    pub min_opponent_dist: f64,
}

impl Default for DribbleGenerator {
    fn default() -> Self {
        Self { direction_count: 12, lengths: vec![4.0, 8.0], dribble_speed: 0.8, min_opponent_dist: 2.0 }
    }
}

fn dribble_safety(opponent_dist: f64) -> SafetyLevel {
    if opponent_dist >= 6.0 {
        SafetyLevel::Safe
    } else if opponent_dist >= 4.0 {
        SafetyLevel::MaybeDangerous
    } else {
        SafetyLevel::Dangerous
    }
}

impl ActionGenerator for DribbleGenerator {
    fn generate(
        &self,
        result: &mut Vec<ActionStatePair>,
        state: &Rc<PredictState>,
        _wm: &WorldSnapshot,
        _path: &[ActionStatePair],
    ) {
        let Some(holder) = state.ball_holder() else {
            return;
        };
        let ball = state.ball().pos;
        let n = self.direction_count.max(1);

        for i in 0..n {
            let deg = -180.0 + 360.0 * i as f64 / n as f64;
            for &len in &self.lengths {
                let target = ball + Vec2::from_polar(len, deg);
                if !geom::in_pitch(target) {
                    continue;
                }

                // blocked if any opponent is closer to the target than we can get there
                let opp_dist = state.nearest_opponent_dist(target);
                if opp_dist < self.min_opponent_dist {
                    continue;
                }

                let steps = (len / self.dribble_speed).ceil() as u32;
                let first_vel = Vec2::from_polar(self.dribble_speed, deg);
                let action = CooperativeAction::dribble(holder.unum, target, first_vel, 1, steps)
                    .with_safety(dribble_safety(opp_dist));
                let next = PredictState::after(state, steps, holder.unum, target);
                result.push(ActionStatePair::new(action, Rc::new(next)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ActionCategory;
    use crate::scenario;

    #[test]
    fn test_dribbles_stay_in_pitch_and_keep_holder() {
        let wm = scenario::counter_attack();
        let state = Rc::new(PredictState::from_world(&wm));
        let mut out = Vec::new();
        DribbleGenerator::default().generate(&mut out, &state, &wm, &[]);

        assert!(!out.is_empty());
        for pair in &out {
            assert_eq!(pair.action().category(), ActionCategory::Dribble);
            assert!(geom::in_pitch(pair.action().target_ball_pos()));
            assert_eq!(pair.state().ball_holder_unum(), wm.self_unum);
            assert!(state.nearest_opponent_dist(pair.action().target_ball_pos()) >= 2.0);
        }
    }

    #[test]
    fn test_no_dribble_without_holder() {
        let mut wm = scenario::counter_attack();
        wm.teammates.clear();
        let state = Rc::new(PredictState::from_world(&wm));
        let mut out = Vec::new();
        DribbleGenerator::default().generate(&mut out, &state, &wm, &[]);
        assert!(out.is_empty());
    }
}
