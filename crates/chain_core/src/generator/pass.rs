use super::ActionGenerator;
use crate::chain::{ActionStatePair, CooperativeAction, PredictState, SafetyLevel};
use crate::geom;
use crate::world::WorldSnapshot;
use std::rc::Rc;

/// Direct passes to the feet of every reachable teammate.
#[derive(Debug, Clone)]
pub struct PassGenerator {
    /// 최소 패스 거리 (m)
    pub min_dist: f64,
    /// 최대 패스 거리 (m)
    pub max_dist: f64,
    /// Ball speed on arrival at the receiver.
    pub end_speed: f64,
}

impl Default for PassGenerator {
    fn default() -> Self {
        Self { min_dist: 3.0, max_dist: 40.0, end_speed: 1.0 }
    }
}

/// Safety of a pass from the closest opponent to the pass line.
fn pass_safety(margin: f64) -> SafetyLevel {
    if margin >= 5.0 {
        SafetyLevel::Safe
    } else if margin >= 3.0 {
        SafetyLevel::MaybeDangerous
    } else if margin >= 1.5 {
        SafetyLevel::Dangerous
    } else {
        SafetyLevel::Failure
    }
}

impl ActionGenerator for PassGenerator {
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

        for receiver in state.our_players() {
            if receiver.unum == holder.unum || receiver.goalie {
                continue;
            }
            // 오프사이드 위치의 선수는 제외
            if receiver.pos.x > 0.0 && receiver.pos.x > state.offside_line_x() {
                continue;
            }

            let target = receiver.pos;
            let dist = ball.dist(target);
            if dist < self.min_dist || dist > self.max_dist || !geom::in_pitch(target) {
                continue;
            }

            let Some(first_speed) = geom::first_speed_for(dist, self.end_speed) else {
                continue;
            };
            let Some(steps) = geom::ball_travel_steps(first_speed, dist) else {
                continue;
            };

            let margin = state
                .opponents()
                .iter()
                .map(|o| o.pos.dist_to_segment(ball, target))
                .fold(f64::INFINITY, f64::min);
            let safety = pass_safety(margin);
            if safety == SafetyLevel::Failure {
                continue;
            }

            let kick_count = if first_speed > 2.5 { 2 } else { 1 };
            let vel = (target - ball).normalized() * first_speed;
            let action = CooperativeAction::pass(holder.unum, receiver.unum, target, vel, kick_count, steps)
                .with_safety(safety);
            let next = PredictState::after(state, steps + kick_count - 1, receiver.unum, target);
            result.push(ActionStatePair::new(action, Rc::new(next)));
        }
    }
}
