//! Chain data model: actions, predicted states, action/state pairs and sequences.

pub mod action;
pub mod predict_state;
pub mod sequence;

pub use action::{ActionCategory, CooperativeAction, SafetyLevel};
pub use predict_state::PredictState;
pub use sequence::{ActionStatePair, Sequence, UNEVALUATED};
pub(crate) use sequence::QueueEntry;
