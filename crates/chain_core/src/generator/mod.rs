//! Action generators: candidate next actions for a predicted state.
//!
//! ## 구조
//!
//! ```text
//! CompositeGenerator
//!   ├─ ShootGenerator            (항상 첫 번째: shoot-priority 계약)
//!   ├─ PassGenerator
//!   ├─ DribbleGenerator
//!   └─ MaxLengthFilter(HoldGenerator, 1)
//! ```
//!
//! The search relies on generator-side ordering: when a shot is available it
//! must be the first candidate, and the search expands nothing else from
//! that node.

pub mod dribble;
pub mod hold;
pub mod pass;
pub mod shoot;

pub use dribble::DribbleGenerator;
pub use hold::HoldGenerator;
pub use pass::PassGenerator;
pub use shoot::ShootGenerator;

use crate::chain::{ActionStatePair, PredictState};
use crate::world::WorldSnapshot;
use std::rc::Rc;

/// Produces candidate next action/state pairs.
pub trait ActionGenerator {
    /// Appends candidates reachable from `state` after `path` to `result`.
    ///
    /// If a shot is among the candidates it must be appended first.
    fn generate(
        &self,
        result: &mut Vec<ActionStatePair>,
        state: &Rc<PredictState>,
        wm: &WorldSnapshot,
        path: &[ActionStatePair],
    );
}

/// Runs sub-generators in order and re-indexes their output.
#[derive(Default)]
pub struct CompositeGenerator {
    generators: Vec<Box<dyn ActionGenerator>>,
}

impl CompositeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, generator: impl ActionGenerator + 'static) -> Self {
        self.generators.push(Box::new(generator));
        self
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Shoot → pass → dribble → hold (first action only).
    pub fn standard() -> Self {
        Self::new()
            .with(ShootGenerator::default())
            .with(PassGenerator::default())
            .with(DribbleGenerator::default())
            .with(MaxLengthFilter::new(HoldGenerator, 1))
    }
}

impl ActionGenerator for CompositeGenerator {
    fn generate(
        &self,
        result: &mut Vec<ActionStatePair>,
        state: &Rc<PredictState>,
        wm: &WorldSnapshot,
        path: &[ActionStatePair],
    ) {
        let start = result.len();
        for generator in &self.generators {
            generator.generate(result, state, wm, path);
        }

        // sibling index = position among this node's candidates
        for (i, pair) in result[start..].iter_mut().enumerate() {
            pair.action_mut().set_index(i);
        }
    }
}

/// Enables the wrapped generator only while `path.len() < max_length`.
pub struct MaxLengthFilter<G> {
    inner: G,
    max_length: usize,
}

impl<G> MaxLengthFilter<G> {
    pub fn new(inner: G, max_length: usize) -> Self {
        Self { inner, max_length }
    }
}

impl<G: ActionGenerator> ActionGenerator for MaxLengthFilter<G> {
    fn generate(
        &self,
        result: &mut Vec<ActionStatePair>,
        state: &Rc<PredictState>,
        wm: &WorldSnapshot,
        path: &[ActionStatePair],
    ) {
        if path.len() < self.max_length {
            self.inner.generate(result, state, wm, path);
        }
    }
}

/// Enables the wrapped generator only while `min_length <= path.len() < max_length`.
pub struct RangeLengthFilter<G> {
    inner: G,
    min_length: usize,
    max_length: usize,
}

impl<G> RangeLengthFilter<G> {
    pub fn new(inner: G, min_length: usize, max_length: usize) -> Self {
        Self { inner, min_length, max_length }
    }
}

impl<G: ActionGenerator> ActionGenerator for RangeLengthFilter<G> {
    fn generate(
        &self,
        result: &mut Vec<ActionStatePair>,
        state: &Rc<PredictState>,
        wm: &WorldSnapshot,
        path: &[ActionStatePair],
    ) {
        if (self.min_length..self.max_length).contains(&path.len()) {
            self.inner.generate(result, state, wm, path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ActionCategory;
    use crate::scenario;

    fn generate(generator: &dyn ActionGenerator, wm: &WorldSnapshot, path: &[ActionStatePair]) -> Vec<ActionStatePair> {
        let state = Rc::new(PredictState::from_world(wm));
        let mut out = Vec::new();
        generator.generate(&mut out, &state, wm, path);
        out
    }

    #[test]
    fn test_standard_puts_shot_first_in_range() {
        let wm = scenario::edge_of_box();
        let out = generate(&CompositeGenerator::standard(), &wm, &[]);
        assert!(!out.is_empty());
        assert_eq!(out[0].action().category(), ActionCategory::Shoot);
    }

    #[test]
    fn test_composite_reindexes_siblings() {
        let wm = scenario::counter_attack();
        let out = generate(&CompositeGenerator::standard(), &wm, &[]);
        for (i, pair) in out.iter().enumerate() {
            assert_eq!(pair.action().index(), i);
        }
    }

    #[test]
    fn test_hold_only_as_first_action() {
        let wm = scenario::counter_attack();
        let first = generate(&CompositeGenerator::standard(), &wm, &[]);
        assert!(first.iter().any(|p| p.action().category() == ActionCategory::Hold));

        let path = vec![first[0].clone()];
        let second = generate(&CompositeGenerator::standard(), &wm, &path);
        assert!(second.iter().all(|p| p.action().category() != ActionCategory::Hold));
    }

    #[test]
    fn test_range_filter() {
        let wm = scenario::counter_attack();
        let filter = RangeLengthFilter::new(HoldGenerator, 1, 2);
        assert!(generate(&filter, &wm, &[]).is_empty());

        let hold = generate(&HoldGenerator, &wm, &[]);
        assert_eq!(generate(&filter, &wm, &hold).len(), 1);
    }
}
