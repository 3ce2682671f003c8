//! Test Fixtures for the search strategies.
//!
//! A `ScriptedTree` describes the chain graph by the index path of each
//! node: `node(&[], ..)` lists the root candidates, `node(&[0], ..)` the
//! candidates after the first root candidate, and so on. Each candidate
//! carries the value the scripted evaluator returns for the chain ending
//! in it.
//!
//! ## Usage
//! ```rust,ignore
//! let tree = ScriptedTree::new().node(&[], &[(ActionCategory::Pass, 5.0)]);
//! let (evaluator, generator) = scripted(tree);
//! ```

use crate::chain::{ActionCategory, ActionStatePair, CooperativeAction, PredictState};
use crate::evaluator::FieldEvaluator;
use crate::generator::ActionGenerator;
use crate::geom::Vec2;
use crate::world::{BallObject, GameTime, PlayerObject, WorldSnapshot};
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

// =============================================================================
// Scripted chain graph
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct ScriptedTree {
    nodes: HashMap<Vec<usize>, Vec<(ActionCategory, f64)>>,
}

impl ScriptedTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, path: &[usize], children: &[(ActionCategory, f64)]) -> Self {
        self.nodes.insert(path.to_vec(), children.to_vec());
        self
    }

    /// Full tree with `branching` children per node down to `depth`.
    ///
    /// The value of a node is the sum of its indices plus its depth, so
    /// deeper and later chains score higher.
    pub fn uniform(branching: usize, depth: usize) -> Self {
        fn fill(tree: &mut ScriptedTree, path: &mut Vec<usize>, branching: usize, depth: usize) {
            if path.len() >= depth {
                return;
            }
            let base: usize = path.iter().sum::<usize>() + path.len() + 1;
            let children: Vec<_> = (0..branching).map(|i| (ActionCategory::Dribble, (base + i) as f64)).collect();
            tree.nodes.insert(path.clone(), children);
            for i in 0..branching {
                path.push(i);
                fill(tree, path, branching, depth);
                path.pop();
            }
        }

        let mut tree = ScriptedTree::new();
        fill(&mut tree, &mut Vec::new(), branching, depth);
        tree
    }

    pub fn value_of(&self, path: &[usize]) -> Option<f64> {
        let (last, parent) = path.split_last()?;
        self.nodes.get(parent)?.get(*last).map(|(_, v)| *v)
    }
}

fn index_path(path: &[ActionStatePair]) -> Vec<usize> {
    path.iter().map(|p| p.action().index()).collect()
}

pub struct ScriptedGenerator {
    tree: ScriptedTree,
    pub calls: Cell<usize>,
}

impl ActionGenerator for ScriptedGenerator {
    fn generate(
        &self,
        result: &mut Vec<ActionStatePair>,
        state: &Rc<PredictState>,
        _wm: &WorldSnapshot,
        path: &[ActionStatePair],
    ) {
        self.calls.set(self.calls.get() + 1);
        let Some(children) = self.tree.nodes.get(&index_path(path)) else {
            return;
        };

        let holder = state.ball_holder_unum();
        let ball = state.ball().pos;
        for (i, (category, _)) in children.iter().enumerate() {
            let target = ball + Vec2::new(1.0 + i as f64, 0.0);
            let (action, next_holder) = match category {
                ActionCategory::Shoot => {
                    (CooperativeAction::shoot(holder, target, Vec2::new(3.0, 0.0), 1, 5), holder)
                }
                ActionCategory::Pass => {
                    let receiver = 9 + i as u8;
                    (CooperativeAction::pass(holder, receiver, target, Vec2::new(2.0, 0.0), 1, 5), receiver)
                }
                ActionCategory::Dribble => {
                    (CooperativeAction::dribble(holder, target, Vec2::new(0.8, 0.0), 1, 3), holder)
                }
                ActionCategory::Hold => (CooperativeAction::hold(holder, ball), holder),
            };
            let next = PredictState::after(state, 1, next_holder, target);
            result.push(ActionStatePair::new(action.with_index(i), Rc::new(next)));
        }
    }
}

pub struct ScriptedEvaluator {
    tree: ScriptedTree,
    /// Value of the empty chain.
    pub root_value: f64,
    pub penalty: f64,
    pub calls: Cell<usize>,
}

impl FieldEvaluator for ScriptedEvaluator {
    fn evaluate(&self, _first_state: &PredictState, path: &[ActionStatePair]) -> f64 {
        self.calls.set(self.calls.get() + 1);
        if path.is_empty() {
            return self.root_value;
        }
        self.tree.value_of(&index_path(path)).unwrap_or(0.0)
    }

    fn first_action_penalty(&self, _first_state: &PredictState, _first: &ActionStatePair) -> f64 {
        self.penalty
    }
}

pub fn scripted(tree: ScriptedTree) -> (Rc<ScriptedEvaluator>, Rc<ScriptedGenerator>) {
    scripted_with_root(tree, 0.0)
}

pub fn scripted_with_root(tree: ScriptedTree, root_value: f64) -> (Rc<ScriptedEvaluator>, Rc<ScriptedGenerator>) {
    scripted_full(tree, root_value, 0.0)
}

/// Like [`scripted`], with a constant first-action penalty.
pub fn scripted_with_penalty(tree: ScriptedTree, penalty: f64) -> (Rc<ScriptedEvaluator>, Rc<ScriptedGenerator>) {
    scripted_full(tree, 0.0, penalty)
}

fn scripted_full(
    tree: ScriptedTree,
    root_value: f64,
    penalty: f64,
) -> (Rc<ScriptedEvaluator>, Rc<ScriptedGenerator>) {
    let evaluator = ScriptedEvaluator { tree: tree.clone(), root_value, penalty, calls: Cell::new(0) };
    let generator = ScriptedGenerator { tree, calls: Cell::new(0) };
    (Rc::new(evaluator), Rc::new(generator))
}

// =============================================================================
// World fixtures
// =============================================================================

/// #7 holds the ball at the centre spot, #9/#10/#11 ahead.
pub fn fixture_world() -> WorldSnapshot {
    WorldSnapshot {
        time: GameTime::new(100, 0),
        self_unum: 7,
        ball: BallObject::at(Vec2::new(0.0, 0.0)),
        teammates: vec![
            PlayerObject::goalie(1, Vec2::new(-50.0, 0.0)),
            PlayerObject::new(7, Vec2::new(0.0, 0.0)),
            PlayerObject::new(9, Vec2::new(15.0, 5.0)),
            PlayerObject::new(10, Vec2::new(15.0, -5.0)),
            PlayerObject::new(11, Vec2::new(25.0, 0.0)),
        ],
        opponents: vec![PlayerObject::goalie(1, Vec2::new(50.0, 0.0)), PlayerObject::new(2, Vec2::new(30.0, 0.0))],
        self_kickable: true,
        kickable_teammate: None,
    }
}

pub fn fixture_world_at(cycle: u32) -> WorldSnapshot {
    WorldSnapshot { time: GameTime::new(cycle, 0), ..fixture_world() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_tree_shape() {
        let tree = ScriptedTree::uniform(2, 3);
        // 1 + 2 + 4 internal nodes
        assert_eq!(tree.nodes.len(), 7);
        assert_eq!(tree.value_of(&[0]), Some(1.0));
        assert_eq!(tree.value_of(&[1, 1]), Some(4.0));
        assert_eq!(tree.value_of(&[1, 1, 1]), Some(6.0));
        assert_eq!(tree.value_of(&[]), None);
    }
}
