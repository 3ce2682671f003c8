//! Playout tree of the Monte Carlo search, stored in an arena.
//!
//! Nodes live in one `Vec` and refer to their children by [`NodeId`]. There
//! are no back references: the tree is torn down in one go by [`MctsTree::reset`]
//! at the start of every search.

use crate::chain::ActionStatePair;

/// `ucb_value` of a child that has never been backed up.
///
/// Any negative UCB value forces the child to be selected next.
pub const UCB_UNVISITED: f64 = -1.0;

/// Index of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

#[derive(Debug, Clone)]
pub struct MctsNode {
    pub data: ActionStatePair,
    pub children: Vec<NodeId>,
    /// One-way `unexpanded -> expanded` flag.
    pub expanded: bool,
    pub visit_count: u32,
    /// Evaluator score of the chain ending at this node.
    pub original_value: f64,
    pub cumulative_value: f64,
    pub ucb_value: f64,
}

impl MctsNode {
    pub fn new(data: ActionStatePair, original_value: f64) -> Self {
        Self {
            data,
            children: Vec::new(),
            expanded: false,
            visit_count: 0,
            original_value,
            cumulative_value: 0.0,
            ucb_value: UCB_UNVISITED,
        }
    }

    /// Mean backed-up value, or the evaluator score before the first visit.
    pub fn average_value(&self) -> f64 {
        if self.visit_count == 0 {
            self.original_value
        } else {
            self.cumulative_value / f64::from(self.visit_count)
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct MctsTree {
    nodes: Vec<MctsNode>,
}

impl MctsTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every node and installs `root` as node 0.
    pub fn reset(&mut self, root: MctsNode) -> NodeId {
        self.nodes.clear();
        self.allocate(root)
    }

    /// Root node ID (node 0).
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.0 as usize]
    }

    pub fn allocate(&mut self, node: MctsNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Allocates `child` and appends it to `parent`'s children.
    pub fn add_child(&mut self, parent: NodeId, child: MctsNode) -> NodeId {
        let child_id = self.allocate(child);
        self.get_mut(parent).children.push(child_id);
        child_id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Child to descend into on the next playout.
    ///
    /// The first child with a negative UCB value wins outright; otherwise the
    /// highest UCB value, first encountered on ties.
    pub fn select_child(&self, parent: NodeId) -> Option<NodeId> {
        let children = &self.get(parent).children;
        if let Some(&forced) = children.iter().find(|&&c| self.get(c).ucb_value < 0.0) {
            return Some(forced);
        }
        best_by(children, |id| self.get(id).ucb_value)
    }

    /// Child with the highest average value, first encountered on ties.
    pub fn best_average_child(&self, parent: NodeId) -> Option<NodeId> {
        best_by(&self.get(parent).children, |id| self.get(id).average_value())
    }

    /// Mean of the children's average values.
    pub fn mean_child_value(&self, parent: NodeId) -> Option<f64> {
        let children = &self.get(parent).children;
        if children.is_empty() {
            return None;
        }
        let sum: f64 = children.iter().map(|&c| self.get(c).average_value()).sum();
        Some(sum / children.len() as f64)
    }
}

fn best_by(ids: &[NodeId], key: impl Fn(NodeId) -> f64) -> Option<NodeId> {
    let mut best: Option<(NodeId, f64)> = None;
    for &id in ids {
        let value = key(id);
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((id, value)),
        }
    }
    best.map(|(id, _)| id)
}
