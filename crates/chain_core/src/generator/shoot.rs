use super::ActionGenerator;
use crate::chain::{ActionStatePair, CooperativeAction, PredictState, SafetyLevel};
use crate::geom::{self, Vec2, BALL_SPEED_MAX, GOAL_HALF_WIDTH, OPPONENT_GOAL};
use crate::world::WorldSnapshot;
use std::rc::Rc;

/// Emits at most one shot: the goal-mouth course with the widest opponent margin.
#[derive(Debug, Clone)]
pub struct ShootGenerator {
    /// 슛 최대 거리 (m)
    pub max_shoot_dist: f64,
    /// Number of target points spread over the goal mouth.
    pub course_count: usize,
}

impl Default for ShootGenerator {
    fn default() -> Self {
        Self { max_shoot_dist: 20.0, course_count: 5 }
    }
}

impl ShootGenerator {
    fn courses(&self) -> impl Iterator<Item = Vec2> + '_ {
        let half = GOAL_HALF_WIDTH - 1.0;
        let n = self.course_count.max(2);
        (0..n).map(move |i| {
            let y = -half + 2.0 * half * i as f64 / (n - 1) as f64;
            Vec2::new(OPPONENT_GOAL.x, y)
        })
    }
}

fn shot_safety(margin: f64) -> SafetyLevel {
    if margin >= 3.0 {
        SafetyLevel::Safe
    } else if margin >= 1.5 {
        SafetyLevel::MaybeDangerous
    } else if margin >= 0.8 {
        SafetyLevel::Dangerous
    } else {
        SafetyLevel::Failure
    }
}

impl ActionGenerator for ShootGenerator {
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
        if ball.dist(OPPONENT_GOAL) > self.max_shoot_dist || !geom::in_pitch(ball) {
            return;
        }

        let best = self
            .courses()
            .filter_map(|target| {
                let margin = state
                    .opponents()
                    .iter()
                    .map(|o| o.pos.dist_to_segment(ball, target))
                    .fold(f64::INFINITY, f64::min);
                let steps = geom::ball_travel_steps(BALL_SPEED_MAX, ball.dist(target))?;
                Some((target, margin, steps))
            })
            .max_by(|a, b| a.1.total_cmp(&b.1));

        let Some((target, margin, steps)) = best else {
            return;
        };
        let safety = shot_safety(margin);
        if safety == SafetyLevel::Failure {
            return;
        }

        let vel = (target - ball).normalized() * BALL_SPEED_MAX;
        let action = CooperativeAction::shoot(holder.unum, target, vel, 1, steps).with_safety(safety);
        let next = PredictState::after(state, steps, holder.unum, target);
        result.push(ActionStatePair::new(action, Rc::new(next)));
    }
}
