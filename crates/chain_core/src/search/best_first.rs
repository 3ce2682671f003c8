//! Best-first chain search.
//!
//! Expands the highest-scoring frontier sequence first until the frontier is
//! empty or the node budget is spent. No optimality guarantee; good chains
//! are found early when the evaluator is expensive.

use super::SearchCore;
use crate::chain::{CooperativeAction, PredictState, QueueEntry, Sequence};
use crate::config::{LastDecisionConfig, SearchConfig, StrategyKind};
use crate::evaluator::FieldEvaluator;
use crate::generator::ActionGenerator;
use crate::geom::Vec2;
use crate::world::{GameTime, WorldSnapshot};
use std::collections::BinaryHeap;
use std::rc::Rc;

/// First action chosen in a previous cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LastDecision {
    pub time: GameTime,
    pub target_unum: Option<u8>,
    pub target_pos: Vec2,
}

pub struct BestFirstSearch {
    pub(crate) core: SearchCore,
    last_decision_config: LastDecisionConfig,
    last_decision: Option<LastDecision>,
}

impl BestFirstSearch {
    pub fn new(config: &SearchConfig, evaluator: Rc<dyn FieldEvaluator>, generator: Rc<dyn ActionGenerator>) -> Self {
        Self {
            core: SearchCore::new(config, evaluator, generator),
            last_decision_config: config.last_decision.clone(),
            last_decision: None,
        }
    }

    pub fn search(&mut self, wm: &WorldSnapshot) {
        let first_state = self.core.begin(wm);
        self.expand_frontier(wm, &first_state);

        if let Some(first) = self.core.result.first_action() {
            self.last_decision = Some(LastDecision {
                time: wm.time,
                target_unum: first.target_player_unum(),
                target_pos: first.target_ball_pos(),
            });
        }
        self.core.finish(StrategyKind::BestFirst, wm);
    }

    pub fn best_sequence(&self) -> &Sequence {
        &self.core.result
    }

    pub fn node_count(&self) -> usize {
        self.core.stats.node_count
    }

    pub fn last_decision(&self) -> Option<&LastDecision> {
        self.last_decision.as_ref()
    }

    pub fn set_field_evaluator(&mut self, evaluator: Rc<dyn FieldEvaluator>) {
        self.core.evaluator = evaluator;
    }

    fn expand_frontier(&mut self, wm: &WorldSnapshot, first_state: &Rc<PredictState>) {
        let mut queue = BinaryHeap::new();
        queue.push(QueueEntry(Sequence::new()));
        let mut candidates = Vec::new();

        while let Some(QueueEntry(series)) = queue.pop() {
            if series.len() >= self.core.max_depth || series.is_terminated() {
                continue;
            }

            let state = series.last().map_or_else(|| Rc::clone(first_state), |p| Rc::clone(p.state_rc()));
            self.core.generate(&mut candidates, &state, wm, series.chain());

            for candidate in candidates.drain(..) {
                if self.core.budget_exhausted() {
                    return;
                }

                let mut next = series.extended(candidate);
                let mut value = self.core.evaluate_path(first_state, next.chain_mut());
                if let Some(first) = next.first_action() {
                    value -= self.switch_penalty(wm, first);
                }
                next.set_value(value);
                if let Some(last) = next.last_mut() {
                    last.action_mut().set_value(value);
                }

                if value > self.core.result.value() {
                    log::trace!(
                        "{} best-first: new best {:.3} (len {}, first {:?})",
                        wm.time,
                        value,
                        next.len(),
                        next.first_action().map(|a| a.category())
                    );
                    self.core.result = next.clone();
                }

                if self.core.budget_exhausted() {
                    return;
                }
                queue.push(QueueEntry(next));
            }
        }
    }

    /// Penalty for passing to a different receiver than last cycle.
    fn switch_penalty(&self, wm: &WorldSnapshot, first: &CooperativeAction) -> f64 {
        if !self.last_decision_config.enabled {
            return 0.0;
        }
        let Some(last) = &self.last_decision else {
            return 0.0;
        };
        if !wm.time.follows(last.time) {
            return 0.0;
        }
        match (first.target_player_unum(), last.target_unum) {
            (Some(now), Some(before)) if now != before => self.last_decision_config.switch_penalty,
            _ => 0.0,
        }
    }
}
