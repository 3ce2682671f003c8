//! Action/state pairs and the sequences the search compares.

use super::action::CooperativeAction;
use super::predict_state::PredictState;
use std::cmp::Ordering;
use std::rc::Rc;

/// Score of a sequence nothing has been evaluated for yet.
pub const UNEVALUATED: f64 = -f64::MAX;

/// One edge of the chain graph: an action and the state it leads to.
#[derive(Debug, Clone)]
pub struct ActionStatePair {
    action: CooperativeAction,
    state: Rc<PredictState>,
}

impl ActionStatePair {
    pub fn new(action: CooperativeAction, state: Rc<PredictState>) -> Self {
        Self { action, state }
    }

    pub fn action(&self) -> &CooperativeAction {
        &self.action
    }

    pub fn action_mut(&mut self) -> &mut CooperativeAction {
        &mut self.action
    }

    pub fn state(&self) -> &PredictState {
        &self.state
    }

    /// Shared handle to the resulting state (for expanding children).
    pub fn state_rc(&self) -> &Rc<PredictState> {
        &self.state
    }
}

/// A complete or partial plan.
///
/// `hvalue` mirrors `value`; it only exists as the best-first queue key.
#[derive(Debug, Clone)]
pub struct Sequence {
    chain: Vec<ActionStatePair>,
    value: f64,
    hvalue: f64,
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequence {
    pub fn new() -> Self {
        Self { chain: Vec::new(), value: UNEVALUATED, hvalue: UNEVALUATED }
    }

    pub fn from_chain(chain: Vec<ActionStatePair>, value: f64) -> Self {
        Self { chain, value, hvalue: value }
    }

    pub fn chain(&self) -> &[ActionStatePair] {
        &self.chain
    }

    pub fn chain_mut(&mut self) -> &mut [ActionStatePair] {
        &mut self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn hvalue(&self) -> f64 {
        self.hvalue
    }

    pub fn first(&self) -> Option<&ActionStatePair> {
        self.chain.first()
    }

    pub fn last(&self) -> Option<&ActionStatePair> {
        self.chain.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut ActionStatePair> {
        self.chain.last_mut()
    }

    pub fn first_action(&self) -> Option<&CooperativeAction> {
        self.first().map(ActionStatePair::action)
    }

    /// A sequence ending with a final action is never extended.
    pub fn is_terminated(&self) -> bool {
        self.last().is_some_and(|p| p.action().is_final_action())
    }

    /// Sets `value` and `hvalue` together.
    pub fn set_value(&mut self, value: f64) {
        self.value = value;
        self.hvalue = value;
    }

    /// `self` with `pair` appended; value is reset until re-evaluated.
    pub fn extended(&self, pair: ActionStatePair) -> Self {
        let mut chain = Vec::with_capacity(self.chain.len() + 1);
        chain.extend(self.chain.iter().cloned());
        chain.push(pair);
        Self { chain, value: UNEVALUATED, hvalue: UNEVALUATED }
    }

    pub fn clear(&mut self) {
        self.chain.clear();
        self.value = UNEVALUATED;
        self.hvalue = UNEVALUATED;
    }
}

/// Max-heap entry ordered by `hvalue`.
#[derive(Debug)]
pub(crate) struct QueueEntry(pub Sequence);

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.hvalue.total_cmp(&other.0.hvalue)
    }
}
