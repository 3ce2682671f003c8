//! Chain Holder
//!
//! Owns the one search strategy of an agent and runs it at most once per
//! simulation cycle. Tactical behaviours read the result through
//! [`ChainHolder::graph`] or [`ChainHolder::decision`].
//!
//! The holder is an ordinary value: create one per agent at startup and
//! pass it to whoever needs the chain.

use crate::chain::CooperativeAction;
use crate::config::SearchConfig;
use crate::error::{ChainError, Result};
use crate::evaluator::FieldEvaluator;
use crate::generator::ActionGenerator;
use crate::search::ActionChainGraph;
use crate::world::{GameTime, WorldSnapshot};
use std::rc::Rc;

pub struct ChainHolder {
    config: SearchConfig,
    graph: Option<ActionChainGraph>,
    /// Timestamp of the last search
    last_update: Option<GameTime>,
}

impl ChainHolder {
    pub fn new(config: SearchConfig) -> Self {
        Self { config, graph: None, last_update: None }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.graph.is_some()
    }

    /// Builds the configured strategy. Calling it again replaces the strategy
    /// and forgets the last update time.
    pub fn init(&mut self, evaluator: Rc<dyn FieldEvaluator>, generator: Rc<dyn ActionGenerator>) -> Result<()> {
        self.config.validate()?;
        log::info!(
            "chain holder: {} search, max_depth={} max_traversal={}",
            self.config.strategy,
            self.config.max_depth,
            self.config.max_traversal
        );
        self.graph = Some(ActionChainGraph::new(&self.config, evaluator, generator));
        self.last_update = None;
        Ok(())
    }

    /// Runs the search for `wm.time` unless it already ran for that time.
    ///
    /// Returns whether a search was run.
    pub fn update(&mut self, wm: &WorldSnapshot) -> Result<bool> {
        let graph = self.graph.as_mut().ok_or(ChainError::NotInitialized)?;
        if self.last_update == Some(wm.time) {
            log::warn!("{} chain holder: already updated this cycle, skipping", wm.time);
            return Ok(false);
        }
        self.last_update = Some(wm.time);
        graph.search(wm);
        Ok(true)
    }

    pub fn last_update(&self) -> Option<GameTime> {
        self.last_update
    }

    pub fn graph(&self) -> Result<&ActionChainGraph> {
        self.graph.as_ref().ok_or(ChainError::NotInitialized)
    }

    /// Swaps the evaluator for the next search (e.g. on a tactic change).
    pub fn set_field_evaluator(&mut self, evaluator: Rc<dyn FieldEvaluator>) -> Result<()> {
        let graph = self.graph.as_mut().ok_or(ChainError::NotInitialized)?;
        log::info!("chain holder: field evaluator replaced");
        graph.set_field_evaluator(evaluator);
        Ok(())
    }

    /// Action to execute this cycle; see [`ActionChainGraph::decision`].
    pub fn decision(&self, wm: &WorldSnapshot) -> Result<Option<CooperativeAction>> {
        Ok(self.graph()?.decision(wm))
    }
}
