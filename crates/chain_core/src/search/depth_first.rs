//! Exhaustive depth-first chain search.
//!
//! Every visited node is evaluated and compared, so the result is the best
//! path among everything explored before the budget ran out. Used as a
//! reference when tuning the other strategies.

use super::SearchCore;
use crate::chain::{ActionStatePair, PredictState, Sequence};
use crate::config::{SearchConfig, StrategyKind};
use crate::evaluator::FieldEvaluator;
use crate::generator::ActionGenerator;
use crate::world::WorldSnapshot;
use std::rc::Rc;

pub struct DepthFirstSearch {
    pub(crate) core: SearchCore,
}

impl DepthFirstSearch {
    pub fn new(config: &SearchConfig, evaluator: Rc<dyn FieldEvaluator>, generator: Rc<dyn ActionGenerator>) -> Self {
        Self { core: SearchCore::new(config, evaluator, generator) }
    }

    pub fn search(&mut self, wm: &WorldSnapshot) {
        let first_state = self.core.begin(wm);
        let mut path = Vec::with_capacity(self.core.max_depth + 1);
        if let Some(best) = self.visit(wm, &first_state, &first_state, &mut path) {
            self.core.result = best;
        }
        self.core.finish(StrategyKind::DepthFirst, wm);
    }

    pub fn best_sequence(&self) -> &Sequence {
        &self.core.result
    }

    pub fn node_count(&self) -> usize {
        self.core.stats.node_count
    }

    pub fn set_field_evaluator(&mut self, evaluator: Rc<dyn FieldEvaluator>) {
        self.core.evaluator = evaluator;
    }

    /// Evaluates `path` and every extension of it within the bounds.
    ///
    /// Returns `None` when the path is rejected (too deep or out of budget).
    fn visit(
        &mut self,
        wm: &WorldSnapshot,
        first_state: &PredictState,
        state: &Rc<PredictState>,
        path: &mut Vec<ActionStatePair>,
    ) -> Option<Sequence> {
        if path.len() > self.core.max_depth || self.core.budget_exhausted() {
            return None;
        }

        let value = self.core.evaluate_path(first_state, path);
        if let Some(last) = path.last_mut() {
            last.action_mut().set_value(value);
        }
        let mut best = Sequence::from_chain(path.clone(), value);

        let terminated = path.last().is_some_and(|p| p.action().is_final_action());
        if terminated || path.len() >= self.core.max_depth {
            return Some(best);
        }

        let mut candidates = Vec::new();
        self.core.generate(&mut candidates, state, wm, path);
        for candidate in candidates {
            let next_state = Rc::clone(candidate.state_rc());
            path.push(candidate);
            let child = self.visit(wm, first_state, &next_state, path);
            path.pop();

            if let Some(child) = child {
                if child.value() > best.value() {
                    log::trace!("{} depth-first: new best {:.3} (len {})", wm.time, child.value(), child.len());
                    best = child;
                }
            }
        }
        Some(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ActionCategory;
    use crate::search::test_support::*;

    fn config(max_depth: usize, max_traversal: usize) -> SearchConfig {
        SearchConfig { max_depth, max_traversal, ..SearchConfig::reference() }
    }

    fn run(tree: ScriptedTree, root_value: f64, config: &SearchConfig) -> (DepthFirstSearch, Rc<ScriptedEvaluator>) {
        let (evaluator, generator) = scripted_with_root(tree, root_value);
        let mut search = DepthFirstSearch::new(config, evaluator.clone(), generator);
        search.search(&fixture_world());
        (search, evaluator)
    }

    #[test]
    fn test_finds_deep_optimum_best_first_would_miss() {
        // the weak first step leads to the best two-step chain
        let tree = ScriptedTree::new()
            .node(&[], &[(ActionCategory::Pass, 5.0), (ActionCategory::Dribble, 1.0)])
            .node(&[0], &[(ActionCategory::Pass, 2.0)])
            .node(&[1], &[(ActionCategory::Pass, 8.0)]);
        let (search, evaluator) = run(tree, 0.0, &config(2, 100));

        let best = search.best_sequence();
        assert_eq!(best.value(), 8.0);
        assert_eq!(best.len(), 2);
        assert_eq!(best.first_action().unwrap().category(), ActionCategory::Dribble);
        // root + 4 candidates
        assert_eq!(search.node_count(), 5);
        assert_eq!(evaluator.calls.get(), 5);
    }

    #[test]
    fn test_result_is_max_over_visited() {
        let tree = ScriptedTree::uniform(3, 3);
        for budget in [1, 4, 13, 40, 100] {
            let (search, _) = run(tree.clone(), -1.0, &config(3, budget));
            let visited = search.node_count();
            assert!(visited <= budget);

            // generator order: root, then [0], [0,0], [0,0,0], [0,0,1], ...
            let mut order = vec![Vec::new()];
            fn walk(prefix: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
                if prefix.len() == 3 {
                    return;
                }
                for i in 0..3 {
                    prefix.push(i);
                    out.push(prefix.clone());
                    walk(prefix, out);
                    prefix.pop();
                }
            }
            walk(&mut Vec::new(), &mut order);

            let expected = order[..visited]
                .iter()
                .map(|p| tree.value_of(p).unwrap_or(-1.0))
                .fold(f64::NEG_INFINITY, f64::max);
            assert_eq!(search.best_sequence().value(), expected, "budget {}", budget);
        }
    }

    #[test]
    fn test_budget_bounds_evaluations() {
        for budget in [0, 1, 7, 20] {
            let (search, evaluator) = run(ScriptedTree::uniform(3, 3), 0.0, &config(3, budget));
            assert_eq!(search.node_count(), budget);
            assert_eq!(evaluator.calls.get(), budget);
        }
        // root + 3 + 9 + 27
        let (search, _) = run(ScriptedTree::uniform(3, 3), 0.0, &config(3, 1000));
        assert_eq!(search.node_count(), 40);
    }

    #[test]
    fn test_depth_bounds_chain_length() {
        let (search, _) = run(ScriptedTree::uniform(2, 5), 0.0, &config(2, 1000));
        assert_eq!(search.best_sequence().len(), 2);
        assert_eq!(search.node_count(), 1 + 2 + 4);
    }

    #[test]
    fn test_shoot_first_suppresses_siblings() {
        let tree = ScriptedTree::new()
            .node(&[], &[(ActionCategory::Shoot, 1.0), (ActionCategory::Pass, 5.0), (ActionCategory::Dribble, 3.0)])
            .node(&[0], &[(ActionCategory::Pass, 9.0)]);
        let (search, _) = run(tree, 0.0, &config(3, 100));
        // root and the shot, nothing after the shot
        assert_eq!(search.node_count(), 2);
        assert_eq!(search.best_sequence().len(), 1);
        assert_eq!(search.best_sequence().first_action().unwrap().category(), ActionCategory::Shoot);
    }

    #[test]
    fn test_root_better_than_every_chain_gives_empty_result() {
        let tree = ScriptedTree::new().node(&[], &[(ActionCategory::Pass, 1.0)]);
        let (search, _) = run(tree, 10.0, &config(2, 100));
        assert!(search.best_sequence().is_empty());
        assert_eq!(search.best_sequence().value(), 10.0);
        assert_eq!(search.core.stats.best_value, Some(10.0));
        assert_eq!(search.core.stats.best_length, 0);
    }

    #[test]
    fn test_first_action_penalty_is_stamped() {
        let tree = ScriptedTree::new()
            .node(&[], &[(ActionCategory::Dribble, 1.0)])
            .node(&[0], &[(ActionCategory::Pass, 4.0)]);
        let (evaluator, generator) = scripted_with_penalty(tree, 0.25);
        let mut search = DepthFirstSearch::new(&config(2, 100), evaluator, generator);
        search.search(&fixture_world());
        let best = search.best_sequence();
        assert_eq!(best.len(), 2);
        assert_eq!(best.first_action().unwrap().penalty(), 0.25);
        assert_eq!(best.last().unwrap().action().penalty(), 0.0);
    }
}
