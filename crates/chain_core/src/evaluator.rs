//! Field evaluator: scores a chain by the field position it ends in.

use crate::chain::{ActionCategory, ActionStatePair, PredictState, SafetyLevel};
use crate::geom::{self, OPPONENT_GOAL};

/// Scores candidate chains for one search invocation.
///
/// Values are only comparable between chains that share the same
/// `first_state`.
pub trait FieldEvaluator {
    /// Higher is better. `path` may be empty (score of the first state).
    fn evaluate(&self, first_state: &PredictState, path: &[ActionStatePair]) -> f64;

    /// Penalty for executing `first` as this cycle's action.
    ///
    /// Applied once per chain, to the first action only.
    fn first_action_penalty(&self, _first_state: &PredictState, _first: &ActionStatePair) -> f64 {
        0.0
    }
}

/// Position-based evaluator shipped with the engine.
///
/// 점수 = 공 x 좌표 + 골 근접 보너스 + 페널티 박스 보너스 + 슛 보너스
///        - 첫 액션 페널티 - 시간 비용
#[derive(Debug, Clone)]
pub struct DefaultFieldEvaluator {
    /// Radius around the goal that earns a proximity bonus (m).
    pub goal_bonus_radius: f64,
    pub penalty_area_bonus: f64,
    pub shoot_bonus: f64,
    /// Cost per predicted cycle.
    pub time_cost: f64,
}

impl Default for DefaultFieldEvaluator {
    fn default() -> Self {
        Self { goal_bonus_radius: 40.0, penalty_area_bonus: 10.0, shoot_bonus: 1.0e6, time_cost: 0.05 }
    }
}

impl DefaultFieldEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    fn state_point(&self, state: &PredictState) -> f64 {
        let ball = state.ball().pos;
        let mut point = ball.x;
        point += (self.goal_bonus_radius - ball.dist(OPPONENT_GOAL)).max(0.0);
        if geom::in_opponent_penalty_area(ball) {
            point += self.penalty_area_bonus;
        }
        point
    }
}

impl FieldEvaluator for DefaultFieldEvaluator {
    fn evaluate(&self, first_state: &PredictState, path: &[ActionStatePair]) -> f64 {
        let Some(last) = path.last() else {
            return self.state_point(first_state);
        };

        let mut point = self.state_point(last.state());

        let action = last.action();
        if action.category() == ActionCategory::Shoot && action.safety_level() <= SafetyLevel::MaybeDangerous {
            point += self.shoot_bonus;
        }

        if let Some(first) = path.first() {
            point -= first.action().penalty();
        }
        point -= self.time_cost * f64::from(last.state().spend_time());
        point
    }

    fn first_action_penalty(&self, _first_state: &PredictState, first: &ActionStatePair) -> f64 {
        match first.action().safety_level() {
            SafetyLevel::Safe => 0.0,
            SafetyLevel::MaybeDangerous => 5.0,
            SafetyLevel::Dangerous => 20.0,
            SafetyLevel::Failure => 1000.0,
        }
    }
}
