//! Search node: one partial assignment and its derived capacity state.

use crate::error::AssignError;
use crate::model::{Assignment, CompleteAssignment, Preference, PreferenceTable, Requirement};
use indexmap::IndexMap;
use std::fmt;

/// Where a node stands in the search tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// At least one agent unassigned and at least one role open.
    Internal,
    /// Every agent assigned and every role filled exactly.
    Leaf,
    /// An agent remains but every role is already full.
    DeadEnd,
    /// Every agent assigned but some role is short of its headcount.
    Underfilled,
}

/// A partial assignment in the search tree.
///
/// Nodes are write-once: the remaining capacity is derived from the full
/// assignment at construction and never patched afterwards. Children are
/// built from a copy of the parent's assignment plus one pair, so siblings
/// never share mutable state.
#[derive(Debug, Clone)]
pub struct SearchNode<'a> {
    requirement: &'a Requirement,
    assignment: Assignment,
    score: i64,
    available_roles: Vec<&'a str>,
}

impl<'a> SearchNode<'a> {
    /// The empty root: nothing assigned, score 0.
    pub fn root(requirement: &'a Requirement) -> Self {
        Self {
            requirement,
            assignment: Assignment::new(),
            score: 0,
            available_roles: requirement
                .iter()
                .filter(|&(_, capacity)| capacity > 0)
                .map(|(role, _)| role)
                .collect(),
        }
    }

    /// Builds a node from an arbitrary assignment.
    ///
    /// # Errors
    ///
    /// - [`AssignError::UnknownRole`] if the assignment uses a role the
    ///   requirement does not define
    /// - [`AssignError::CapacityExceeded`] if it over-fills a role
    pub fn new(
        requirement: &'a Requirement,
        assignment: Assignment,
        score: i64,
    ) -> Result<Self, AssignError> {
        let mut remaining: IndexMap<&'a str, usize> = requirement.iter().collect();

        for (agent, role) in assignment.iter() {
            let left = remaining
                .get_mut(role)
                .ok_or_else(|| AssignError::UnknownRole {
                    agent: agent.to_string(),
                    role: role.to_string(),
                })?;
            *left = left
                .checked_sub(1)
                .ok_or_else(|| AssignError::CapacityExceeded {
                    role: role.to_string(),
                    capacity: requirement.capacity(role).unwrap_or(0),
                    assigned: assignment.count_for(role),
                })?;
        }

        let available_roles = remaining
            .into_iter()
            .filter(|&(_, left)| left > 0)
            .map(|(role, _)| role)
            .collect();

        Ok(Self {
            requirement,
            assignment,
            score,
            available_roles,
        })
    }

    pub fn requirement(&self) -> &'a Requirement {
        self.requirement
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Accumulated preference score of this node's assignment.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Roles with remaining capacity, in requirement order.
    pub fn available_roles(&self) -> &[&'a str] {
        &self.available_roles
    }

    /// Whether every role holds exactly its required headcount.
    ///
    /// This looks at roles only. An assignment can fill every role while
    /// agents remain unplaced; see [`classify`](Self::classify).
    pub fn is_leaf(&self) -> bool {
        self.requirement
            .iter()
            .all(|(role, capacity)| self.assignment.count_for(role) == capacity)
    }

    /// Checks `candidate` against the requirement this node was built from.
    ///
    /// Capacity is re-derived from the requirement, not from this node.
    /// Returns `Ok(false)` as soon as a role is driven below zero.
    ///
    /// # Errors
    ///
    /// [`AssignError::UnknownRole`] if a role is encountered that the
    /// requirement does not define.
    pub fn is_valid(&self, candidate: &Assignment) -> Result<bool, AssignError> {
        let mut check: IndexMap<&str, usize> = self.requirement.iter().collect();

        for (agent, role) in candidate.iter() {
            let left = check
                .get_mut(role)
                .ok_or_else(|| AssignError::UnknownRole {
                    agent: agent.to_string(),
                    role: role.to_string(),
                })?;
            match left.checked_sub(1) {
                Some(v) => *left = v,
                None => return Ok(false),
            }
        }

        Ok(true)
    }

    /// First agent, in table order, not yet assigned.
    pub fn next_agent<'p>(
        &self,
        preferences: &'p PreferenceTable,
    ) -> Option<(&'p str, &'p Preference)> {
        preferences
            .iter()
            .find(|(agent, _)| !self.assignment.contains_agent(agent))
    }

    /// Classifies this node relative to the agents in `preferences`.
    pub fn classify(&self, preferences: &PreferenceTable) -> NodeKind {
        match self.next_agent(preferences) {
            None if self.is_leaf() => NodeKind::Leaf,
            None => NodeKind::Underfilled,
            Some(_) if self.available_roles.is_empty() => NodeKind::DeadEnd,
            Some(_) => NodeKind::Internal,
        }
    }

    /// Expands the next unassigned agent over every available role.
    ///
    /// Returns no children when every agent is placed or no role is open.
    /// Children come out in `available_roles` order.
    pub fn children(&self, preferences: &PreferenceTable) -> Result<Vec<Self>, AssignError> {
        let Some((agent, preference)) = self.next_agent(preferences) else {
            return Ok(Vec::new());
        };

        self.available_roles
            .iter()
            .map(|&role| {
                SearchNode::new(
                    self.requirement,
                    self.assignment.extended(agent, role),
                    self.score + preference.contribution(role),
                )
            })
            .collect()
    }

    /// Copies the assignment and score out of the node.
    pub fn to_complete(&self) -> CompleteAssignment {
        CompleteAssignment {
            assignment: self.assignment.clone(),
            score: self.score,
        }
    }

    pub fn into_complete(self) -> CompleteAssignment {
        CompleteAssignment {
            assignment: self.assignment,
            score: self.score,
        }
    }
}

impl fmt::Display for SearchNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "STATE: {} || SCORE: {}", self.assignment, self.score)
    }
}
