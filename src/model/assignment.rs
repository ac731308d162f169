//! Agent-to-role assignments.

use super::preference::PreferenceTable;
use indexmap::IndexMap;
use std::fmt;

/// A (possibly partial) mapping from agent to role.
///
/// Insertion order is the order agents were placed. The search never
/// mutates an existing assignment; it derives children with
/// [`Assignment::extended`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Assignment {
    roles: IndexMap<String, String>,
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or moves an agent. Intended for building inputs by hand.
    pub fn insert(&mut self, agent: impl Into<String>, role: impl Into<String>) {
        self.roles.insert(agent.into(), role.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, agent: impl Into<String>, role: impl Into<String>) -> Self {
        self.insert(agent, role);
        self
    }

    /// Returns a copy of this assignment with one more `(agent, role)` pair.
    pub fn extended(&self, agent: &str, role: &str) -> Self {
        let mut roles = IndexMap::with_capacity(self.roles.len() + 1);
        roles.extend(self.roles.iter().map(|(a, r)| (a.clone(), r.clone())));
        roles.insert(agent.to_string(), role.to_string());
        Self { roles }
    }

    /// Role held by `agent`, if assigned.
    pub fn get(&self, agent: &str) -> Option<&str> {
        self.roles.get(agent).map(String::as_str)
    }

    pub fn contains_agent(&self, agent: &str) -> bool {
        self.roles.contains_key(agent)
    }

    /// Number of agents holding `role`.
    pub fn count_for(&self, role: &str) -> usize {
        self.roles.values().filter(|r| *r == role).count()
    }

    /// `(agent, role)` pairs in placement order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.roles.iter().map(|(a, r)| (a.as_str(), r.as_str()))
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (agent, role)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{agent}: {role}")?;
        }
        f.write_str("}")
    }
}

impl<A: Into<String>, R: Into<String>> FromIterator<(A, R)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (A, R)>>(iter: I) -> Self {
        Self {
            roles: iter
                .into_iter()
                .map(|(a, r)| (a.into(), r.into()))
                .collect(),
        }
    }
}

/// A complete assignment detached from the search that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompleteAssignment {
    /// Agent → role mapping.
    pub assignment: Assignment,
    /// Accumulated preference score.
    pub score: i64,
}

/// Scores an assignment from scratch.
///
/// Agents missing from `preferences` contribute nothing.
pub fn score_assignment(assignment: &Assignment, preferences: &PreferenceTable) -> i64 {
    assignment
        .iter()
        .filter_map(|(agent, role)| preferences.get(agent).map(|p| p.contribution(role)))
        .sum()
}
