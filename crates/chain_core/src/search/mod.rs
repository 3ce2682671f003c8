//! Action chain search.
//!
//! Three interchangeable strategies explore the chain graph from the first
//! predicted state and keep the best sequence found within the node budget:
//!
//! | Strategy | Order | Budget meaning |
//! |---|---|---|
//! | [`BestFirstSearch`] | max-heap on `hvalue` | evaluated nodes |
//! | [`DepthFirstSearch`] | recursive, generator order | evaluated nodes |
//! | [`MonteCarloSearch`] | UCB1 playouts | playout iterations |
//!
//! Reaching the budget is the normal way a search ends; it is never an error.
//! An empty best sequence means "hold the ball" (see [`ActionChainGraph::decision`]).

pub mod best_first;
pub mod depth_first;
pub mod monte_carlo;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_support;

pub use best_first::{BestFirstSearch, LastDecision};
pub use depth_first::DepthFirstSearch;
pub use monte_carlo::MonteCarloSearch;

use crate::chain::{ActionCategory, ActionStatePair, CooperativeAction, PredictState, Sequence, UNEVALUATED};
use crate::config::{SearchConfig, StrategyKind};
use crate::evaluator::FieldEvaluator;
use crate::generator::ActionGenerator;
use crate::world::WorldSnapshot;
use serde::Serialize;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Counters of the last `search()` call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStats {
    /// Evaluated candidate nodes.
    pub node_count: usize,
    /// MCTS playout iterations (0 for the other strategies).
    pub playouts: usize,
    pub elapsed: Duration,
    pub best_value: Option<f64>,
    pub best_length: usize,
}

/// State shared by every strategy: collaborators, bounds and the result.
pub(crate) struct SearchCore {
    evaluator: Rc<dyn FieldEvaluator>,
    generator: Rc<dyn ActionGenerator>,
    max_depth: usize,
    max_traversal: usize,
    result: Sequence,
    first_state: Option<Rc<PredictState>>,
    stats: SearchStats,
    started: Option<Instant>,
}

impl SearchCore {
    pub(crate) fn new(
        config: &SearchConfig,
        evaluator: Rc<dyn FieldEvaluator>,
        generator: Rc<dyn ActionGenerator>,
    ) -> Self {
        Self {
            evaluator,
            generator,
            max_depth: config.max_depth,
            max_traversal: config.max_traversal,
            result: Sequence::new(),
            first_state: None,
            stats: SearchStats::default(),
            started: None,
        }
    }

    /// Clears the previous result and builds this cycle's first state.
    pub(crate) fn begin(&mut self, wm: &WorldSnapshot) -> Rc<PredictState> {
        self.result.clear();
        self.stats = SearchStats::default();
        self.started = Some(Instant::now());
        let first_state = Rc::new(PredictState::from_world(wm));
        self.first_state = Some(Rc::clone(&first_state));
        first_state
    }

    pub(crate) fn finish(&mut self, kind: StrategyKind, wm: &WorldSnapshot) {
        self.stats.elapsed = self.started.take().map(|t| t.elapsed()).unwrap_or_default();
        self.stats.best_length = self.result.len();
        self.stats.best_value = (self.result.value() != UNEVALUATED).then(|| self.result.value());

        log::debug!(
            "{} {} search: nodes={} playouts={} best_len={} best_value={:?} elapsed={:?}",
            wm.time,
            kind,
            self.stats.node_count,
            self.stats.playouts,
            self.stats.best_length,
            self.stats.best_value,
            self.stats.elapsed
        );
        if self.max_traversal > 0 && self.stats.node_count >= self.max_traversal {
            log::debug!("{} {} search: node budget {} exhausted", wm.time, kind, self.max_traversal);
        }
    }

    /// Candidates at `state`, with the shoot-priority rule applied.
    pub(crate) fn generate(
        &self,
        out: &mut Vec<ActionStatePair>,
        state: &Rc<PredictState>,
        wm: &WorldSnapshot,
        path: &[ActionStatePair],
    ) {
        out.clear();
        self.generator.generate(out, state, wm, path);
        apply_shoot_priority(out);
    }

    /// Evaluates `path`, stamping the first-action penalty when `path` has
    /// exactly one action. Counts one node.
    pub(crate) fn evaluate_path(&mut self, first_state: &PredictState, path: &mut [ActionStatePair]) -> f64 {
        if let [first] = path {
            let penalty = self.evaluator.first_action_penalty(first_state, first);
            first.action_mut().set_penalty(penalty);
        }
        self.stats.node_count += 1;
        self.evaluator.evaluate(first_state, path)
    }

    pub(crate) fn budget_exhausted(&self) -> bool {
        self.stats.node_count >= self.max_traversal
    }
}

/// If the first candidate is a shot, drop every other candidate.
pub(crate) fn apply_shoot_priority(candidates: &mut Vec<ActionStatePair>) {
    if candidates.first().is_some_and(|c| c.action().category() == ActionCategory::Shoot) {
        candidates.truncate(1);
    }
}

/// The configured search strategy.
pub enum ActionChainGraph {
    BestFirst(BestFirstSearch),
    DepthFirst(DepthFirstSearch),
    MonteCarlo(MonteCarloSearch),
}

impl ActionChainGraph {
    pub fn new(config: &SearchConfig, evaluator: Rc<dyn FieldEvaluator>, generator: Rc<dyn ActionGenerator>) -> Self {
        match config.strategy {
            StrategyKind::BestFirst => Self::BestFirst(BestFirstSearch::new(config, evaluator, generator)),
            StrategyKind::DepthFirst => Self::DepthFirst(DepthFirstSearch::new(config, evaluator, generator)),
            StrategyKind::MonteCarlo => Self::MonteCarlo(MonteCarloSearch::new(config, evaluator, generator)),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::BestFirst(_) => StrategyKind::BestFirst,
            Self::DepthFirst(_) => StrategyKind::DepthFirst,
            Self::MonteCarlo(_) => StrategyKind::MonteCarlo,
        }
    }

    pub fn search(&mut self, wm: &WorldSnapshot) {
        match self {
            Self::BestFirst(s) => s.search(wm),
            Self::DepthFirst(s) => s.search(wm),
            Self::MonteCarlo(s) => s.search(wm),
        }
    }

    fn core(&self) -> &SearchCore {
        match self {
            Self::BestFirst(s) => &s.core,
            Self::DepthFirst(s) => &s.core,
            Self::MonteCarlo(s) => &s.core,
        }
    }

    fn core_mut(&mut self) -> &mut SearchCore {
        match self {
            Self::BestFirst(s) => &mut s.core,
            Self::DepthFirst(s) => &mut s.core,
            Self::MonteCarlo(s) => &mut s.core,
        }
    }

    pub fn best_sequence(&self) -> &Sequence {
        &self.core().result
    }

    pub fn best_first_action(&self) -> Option<&CooperativeAction> {
        self.core().result.first_action()
    }

    pub fn node_count(&self) -> usize {
        self.core().stats.node_count
    }

    pub fn stats(&self) -> &SearchStats {
        &self.core().stats
    }

    /// First predicted state of the last search.
    pub fn first_state(&self) -> Option<&Rc<PredictState>> {
        self.core().first_state.as_ref()
    }

    pub fn set_field_evaluator(&mut self, evaluator: Rc<dyn FieldEvaluator>) {
        self.core_mut().evaluator = evaluator;
    }

    /// Action to execute this cycle.
    ///
    /// The first action of the best chain, or a default hold when the chain is
    /// empty. Depth-first only falls back when self can kick the ball.
    pub fn decision(&self, wm: &WorldSnapshot) -> Option<CooperativeAction> {
        if let Some(action) = self.best_first_action() {
            return Some(action.clone());
        }
        if matches!(self, Self::DepthFirst(_)) && !wm.self_kickable {
            return None;
        }
        self.first_state().map(|state| default_hold(state))
    }
}

/// Hold action built from the first state's ball holder.
pub fn default_hold(first_state: &PredictState) -> CooperativeAction {
    CooperativeAction::hold(first_state.ball_holder_unum(), first_state.ball().pos).with_description("DefaultHold")
}
