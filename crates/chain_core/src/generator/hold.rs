use super::ActionGenerator;
use crate::chain::{ActionStatePair, CooperativeAction, PredictState};
use crate::world::WorldSnapshot;
use std::rc::Rc;

/// Keep the ball for one cycle.
///
/// Usually wrapped in a `MaxLengthFilter` so it only starts a chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldGenerator;

impl ActionGenerator for HoldGenerator {
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
        let action = CooperativeAction::hold(holder.unum, ball);
        let next = PredictState::after(state, 1, holder.unum, ball);
        result.push(ActionStatePair::new(action, Rc::new(next)));
    }
}
