//! Lazy depth-first enumeration of complete assignments.

use super::node::{NodeKind, SearchNode};
use crate::error::AssignError;
use crate::model::{PreferenceTable, Requirement};
use tracing::trace;

/// Counters collected while traversing the search tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped from the stack.
    pub nodes_explored: usize,
    /// Complete assignments found.
    pub leaves: usize,
    /// Nodes with agents left but no open role.
    pub dead_ends: usize,
    /// Nodes with every agent placed but some role short.
    pub underfilled: usize,
    /// Largest number of pending nodes held at once.
    pub max_stack_depth: usize,
}

impl SearchStats {
    /// Folds counters from an independently searched subtree into `self`.
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes_explored += other.nodes_explored;
        self.leaves += other.leaves;
        self.dead_ends += other.dead_ends;
        self.underfilled += other.underfilled;
        self.max_stack_depth = self.max_stack_depth.max(other.max_stack_depth);
    }
}

/// Iterator over every complete assignment reachable from a start node.
///
/// Uses an explicit LIFO stack. A popped node is classified, then expanded;
/// leaves are yielded as they are popped. Since children are pushed in
/// role order, the last available role is explored first.
///
/// The iterator is fused after the first error.
///
/// # Examples
///
/// ```
/// use u_assign::model::{Preference, PreferenceTable, Requirement};
/// use u_assign::search::Leaves;
///
/// let req = Requirement::new().with_role("a", 1).with_role("b", 1);
/// let prefs = PreferenceTable::new()
///     .with_agent("x", Preference::new().liking("a"))
///     .with_agent("y", Preference::new().liking("b"));
///
/// let scores: Vec<i64> = Leaves::new(&req, &prefs)
///     .map(|leaf| leaf.map(|n| n.score()))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(scores, vec![0, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct Leaves<'a> {
    preferences: &'a PreferenceTable,
    stack: Vec<SearchNode<'a>>,
    stats: SearchStats,
    node_limit: usize,
    failed: bool,
}

impl<'a> Leaves<'a> {
    /// Starts from the empty root of `requirement`.
    pub fn new(requirement: &'a Requirement, preferences: &'a PreferenceTable) -> Self {
        Self::from_node(SearchNode::root(requirement), preferences)
    }

    /// Starts from an arbitrary node, enumerating only its subtree.
    pub fn from_node(node: SearchNode<'a>, preferences: &'a PreferenceTable) -> Self {
        Self {
            preferences,
            stack: vec![node],
            stats: SearchStats::default(),
            node_limit: 0,
            failed: false,
        }
    }

    /// Stops after `limit` nodes have been visited. 0 = no limit.
    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = limit;
        self
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Whether no pending nodes remain.
    pub fn is_exhausted(&self) -> bool {
        self.stack.is_empty()
    }

    /// Removes and returns the pending nodes, bottom of the stack first.
    pub(crate) fn take_pending(&mut self) -> Vec<SearchNode<'a>> {
        std::mem::take(&mut self.stack)
    }

    /// Classifies and expands one node, returning it if it is a leaf.
    pub(crate) fn visit(
        &mut self,
        node: SearchNode<'a>,
    ) -> Result<Option<SearchNode<'a>>, AssignError> {
        self.stats.nodes_explored += 1;
        let kind = node.classify(self.preferences);

        let children = node.children(self.preferences)?;
        self.stack.extend(children);
        self.stats.max_stack_depth = self.stats.max_stack_depth.max(self.stack.len());

        match kind {
            NodeKind::Leaf => {
                self.stats.leaves += 1;
                Ok(Some(node))
            }
            NodeKind::DeadEnd => {
                self.stats.dead_ends += 1;
                trace!(assignment = %node.assignment(), "dead end");
                Ok(None)
            }
            NodeKind::Underfilled => {
                self.stats.underfilled += 1;
                trace!(assignment = %node.assignment(), "underfilled");
                Ok(None)
            }
            NodeKind::Internal => Ok(None),
        }
    }

    fn budget_spent(&self) -> bool {
        self.node_limit > 0 && self.stats.nodes_explored >= self.node_limit
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = Result<SearchNode<'a>, AssignError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        while !self.budget_spent() {
            let node = self.stack.pop()?;
            match self.visit(node) {
                Ok(Some(leaf)) => return Some(Ok(leaf)),
                Ok(None) => {}
                Err(err) => {
                    self.failed = true;
                    self.stack.clear();
                    return Some(Err(err));
                }
            }
        }

        None
    }
}

impl std::iter::FusedIterator for Leaves<'_> {}
