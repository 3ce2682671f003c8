//! Monte Carlo tree search over action chains.
//!
//! The evaluator replaces random rollouts: each child is scored once when
//! it is created, and playouts only move these scores around the tree.
//!
//! ## Playout
//! 1. Visit the node; expand it once its visit count reaches the threshold
//!    (the root expands on its first visit).
//! 2. Descend into the UCB1-best child. Children never backed up carry a
//!    negative sentinel and are taken first, in creation order.
//! 3. Back up the child's return value, then return the mean of all
//!    children's average values.
//!
//! After exactly `max_traversal` playouts the result is read off the tree by
//! greedily following the child with the highest average value.

use super::tree::{MctsNode, MctsTree, NodeId};
use super::{default_hold, SearchCore};
use crate::chain::{ActionCategory, ActionStatePair, PredictState, Sequence};
use crate::config::{MctsConfig, SearchConfig, StrategyKind};
use crate::evaluator::FieldEvaluator;
use crate::generator::ActionGenerator;
use crate::world::WorldSnapshot;
use std::rc::Rc;

pub struct MonteCarloSearch {
    pub(crate) core: SearchCore,
    mcts: MctsConfig,
    tree: MctsTree,
}

impl MonteCarloSearch {
    pub fn new(config: &SearchConfig, evaluator: Rc<dyn FieldEvaluator>, generator: Rc<dyn ActionGenerator>) -> Self {
        Self { core: SearchCore::new(config, evaluator, generator), mcts: config.mcts.clone(), tree: MctsTree::new() }
    }

    pub fn search(&mut self, wm: &WorldSnapshot) {
        let first_state = self.core.begin(wm);

        // dummy hold for the ball holder's current state
        let root_pair = ActionStatePair::new(default_hold(&first_state), Rc::clone(&first_state));
        let root_value = self.core.evaluate_path(&first_state, &mut []);
        let root = self.tree.reset(MctsNode::new(root_pair, root_value));

        let mut path = Vec::with_capacity(self.core.max_depth + 1);
        for _ in 0..self.core.max_traversal {
            self.playout(wm, &first_state, &mut path, root);
            self.core.stats.playouts += 1;
        }

        self.core.result = self.greedy_sequence(root);
        self.core.finish(StrategyKind::MonteCarlo, wm);
    }

    pub fn best_sequence(&self) -> &Sequence {
        &self.core.result
    }

    pub fn node_count(&self) -> usize {
        self.core.stats.node_count
    }

    pub fn playouts(&self) -> usize {
        self.core.stats.playouts
    }

    /// Playout tree of the last search.
    pub fn tree(&self) -> &MctsTree {
        &self.tree
    }

    pub fn set_field_evaluator(&mut self, evaluator: Rc<dyn FieldEvaluator>) {
        self.core.evaluator = evaluator;
    }

    fn playout(
        &mut self,
        wm: &WorldSnapshot,
        first_state: &PredictState,
        path: &mut Vec<ActionStatePair>,
        id: NodeId,
    ) -> f64 {
        let threshold = if id == self.tree.root() { 1 } else { self.mcts.expansion_count };
        let node = self.tree.get_mut(id);
        node.visit_count += 1;

        if !node.expanded && node.visit_count >= threshold {
            node.expanded = true;
            let expandable = node.is_leaf() && !node.data.action().is_final_action() && path.len() < self.core.max_depth;
            if expandable {
                self.expand(wm, first_state, path, id);
            }
        }

        let node = self.tree.get(id);
        let original_value = node.original_value;
        if node.is_leaf() {
            return original_value;
        }
        let Some(child) = self.tree.select_child(id) else {
            return original_value;
        };

        path.push(self.tree.get(child).data.clone());
        let child_value = self.playout(wm, first_state, path, child);
        path.pop();

        let parent_visits = f64::from(self.tree.get(id).visit_count);
        let exploration = self.mcts.exploration;
        let child = self.tree.get_mut(child);
        child.cumulative_value += child_value;
        let visits = f64::from(child.visit_count.max(1));
        child.ucb_value = child.cumulative_value / visits + exploration * (parent_visits.ln() / visits).sqrt();

        self.tree.mean_child_value(id).unwrap_or(original_value)
    }

    /// Creates and scores the children of `id`; `path` leads to `id`.
    fn expand(&mut self, wm: &WorldSnapshot, first_state: &PredictState, path: &mut Vec<ActionStatePair>, id: NodeId) {
        let state = Rc::clone(self.tree.get(id).data.state_rc());
        let mut candidates = Vec::new();
        self.core.generate(&mut candidates, &state, wm, path);

        for candidate in candidates {
            path.push(candidate);
            let value = self.core.evaluate_path(first_state, path);
            let Some(mut pair) = path.pop() else {
                break;
            };
            pair.action_mut().set_value(value);

            let is_shoot = pair.action().category() == ActionCategory::Shoot;
            self.tree.add_child(id, MctsNode::new(pair, value));
            if is_shoot {
                break;
            }
        }
    }

    /// Follows the best-average child from the root down to a leaf.
    ///
    /// The sequence value is the average of the last node taken, not an
    /// aggregate over the path.
    fn greedy_sequence(&self, root: NodeId) -> Sequence {
        let mut chain = Vec::new();
        let mut value = None;
        let mut current = root;
        while let Some(child) = self.tree.best_average_child(current) {
            let node = self.tree.get(child);
            chain.push(node.data.clone());
            value = Some(node.average_value());
            current = child;
        }
        match value {
            Some(value) => Sequence::from_chain(chain, value),
            None => Sequence::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::test_support::*;

    fn config(max_depth: usize, max_traversal: usize) -> SearchConfig {
        SearchConfig { max_depth, max_traversal, ..SearchConfig::default() }
    }

    fn run(tree: ScriptedTree, config: &SearchConfig) -> MonteCarloSearch {
        let (evaluator, generator) = scripted(tree);
        let mut search = MonteCarloSearch::new(config, evaluator, generator);
        search.search(&fixture_world());
        search
    }

    #[test]
    fn test_three_children_one_level() {
        let tree = ScriptedTree::new().node(
            &[],
            &[(ActionCategory::Dribble, 1.0), (ActionCategory::Pass, 3.0), (ActionCategory::Dribble, 2.0)],
        );
        let search = run(tree, &config(1, 30));

        assert_eq!(search.playouts(), 30);
        let best = search.best_sequence();
        assert_eq!(best.len(), 1);
        assert_eq!(best.first_action().unwrap().category(), ActionCategory::Pass);
        assert_eq!(best.value(), 3.0);

        let t = search.tree();
        let children = &t.get(t.root()).children;
        assert_eq!(children.len(), 3);
        let visits: u32 = children.iter().map(|&c| t.get(c).visit_count).sum();
        assert_eq!(visits, 30);
        for &c in children {
            assert!(t.get(c).visit_count >= 1);
            assert!(t.get(c).is_leaf());
        }
    }

    #[test]
    fn test_unvisited_child_taken_before_strong_sibling() {
        let tree = ScriptedTree::new().node(&[], &[(ActionCategory::Pass, 10.0), (ActionCategory::Dribble, 0.0)]);

        let search = run(tree.clone(), &config(1, 1));
        let t = search.tree();
        let children = t.get(t.root()).children.clone();
        assert_eq!(t.get(children[0]).visit_count, 1);
        assert!(t.get(children[0]).ucb_value > 0.0);
        assert_eq!(t.get(children[1]).visit_count, 0);

        // second playout goes to the unvisited child despite its low score
        let search = run(tree, &config(1, 2));
        let t = search.tree();
        assert_eq!(t.get(children[0]).visit_count, 1);
        assert_eq!(t.get(children[1]).visit_count, 1);
    }

    #[test]
    fn test_shoot_stops_expansion() {
        let tree = ScriptedTree::new().node(
            &[],
            &[(ActionCategory::Shoot, 1.0), (ActionCategory::Pass, 5.0), (ActionCategory::Dribble, 3.0)],
        );
        let search = run(tree, &config(3, 20));
        let t = search.tree();
        assert_eq!(t.get(t.root()).children.len(), 1);
        assert_eq!(search.best_sequence().first_action().unwrap().category(), ActionCategory::Shoot);
        // the shot is final and never expanded
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_value_is_last_node_average() {
        let tree = ScriptedTree::new()
            .node(&[], &[(ActionCategory::Dribble, 1.0)])
            .node(&[0], &[(ActionCategory::Pass, 5.0)]);
        let search = run(tree, &config(2, 10));

        let best = search.best_sequence();
        assert_eq!(best.len(), 2);
        // first node averages its own score with later backups: (1 + 9 * 5) / 10
        let t = search.tree();
        let first = t.get(t.root()).children[0];
        assert!((t.get(first).average_value() - 4.6).abs() < 1e-9);
        // but the sequence reports the last node only
        assert_eq!(best.value(), 5.0);
    }

    #[test]
    fn test_ucb_uses_parent_visits_after_descent() {
        let tree = ScriptedTree::new().node(&[], &[(ActionCategory::Dribble, 2.0), (ActionCategory::Pass, 4.0)]);
        let search = run(tree, &config(1, 3));

        let t = search.tree();
        let children = &t.get(t.root()).children;
        let (a, b) = (t.get(children[0]), t.get(children[1]));
        // playout 1 backs up A under a root visited once: ln(1) = 0
        assert_eq!(a.visit_count, 1);
        assert_eq!(a.ucb_value, 2.0);
        // playout 3 picks B again with the root at three visits
        assert_eq!(b.visit_count, 2);
        let expected = 4.0 + 2f64.sqrt() * (3f64.ln() / 2.0).sqrt();
        assert!((b.ucb_value - expected).abs() < 1e-12);
    }

    #[test]
    fn test_backup_is_mean_of_child_averages() {
        let tree = ScriptedTree::new()
            .node(&[], &[(ActionCategory::Dribble, 1.0)])
            .node(&[0], &[(ActionCategory::Pass, 10.0), (ActionCategory::Dribble, 0.0)]);
        let search = run(tree, &config(2, 2));

        let t = search.tree();
        let a = t.get(t.root()).children[0];
        // playout 1 returns A's own 1.0; playout 2 expands A and returns (10 + 0) / 2
        assert_eq!(t.get(a).children.len(), 2);
        assert!((t.get(a).average_value() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_playouts_exact_and_depth_respected() {
        for budget in [0, 1, 17, 64] {
            let search = run(ScriptedTree::uniform(3, 4), &config(2, budget));
            assert_eq!(search.playouts(), budget);
            assert!(search.best_sequence().len() <= 2);
        }
    }

    #[test]
    fn test_expansion_waits_for_threshold() {
        let search = run(ScriptedTree::uniform(2, 3), &config(3, 3));
        let t = search.tree();
        let root_children = t.get(t.root()).children.clone();
        // playouts 1 and 2 visit each root child once; neither reached two visits
        assert!(root_children.iter().all(|&c| t.get(c).is_leaf() || t.get(c).visit_count >= 2));
        let expanded = root_children.iter().filter(|&&c| !t.get(c).is_leaf()).count();
        assert_eq!(expanded, 1);
    }

    #[test]
    fn test_empty_generator_gives_empty_result() {
        let search = run(ScriptedTree::new(), &config(4, 10));
        assert!(search.best_sequence().is_empty());
        assert_eq!(search.playouts(), 10);
        assert_eq!(search.tree().len(), 1);
    }
}
