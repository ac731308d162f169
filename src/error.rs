//! Error types for assignment search.

use thiserror::Error;

/// Errors raised by node construction, the validity oracle, and input
/// validation.
///
/// The enumeration path itself never produces these for well-formed node
/// construction; they surface when a caller builds nodes by hand, invokes
/// [`SearchNode::is_valid`](crate::search::SearchNode::is_valid), or asks
/// for input validation up front.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignError {
    /// An assignment or preference references a role the requirement
    /// does not define.
    #[error("unknown role '{role}' for agent '{agent}'")]
    UnknownRole { agent: String, role: String },

    /// An assignment places more agents on a role than its capacity.
    #[error("role '{role}' over capacity: {assigned} assigned, capacity {capacity}")]
    CapacityExceeded {
        role: String,
        capacity: usize,
        assigned: usize,
    },

    /// The number of agents differs from the total number of role slots,
    /// so no complete assignment can exist.
    #[error("{agents} agents cannot fill exactly {slots} role slots")]
    SlotMismatch { agents: usize, slots: usize },

    /// An agent lists more liked or disliked roles than allowed.
    #[error("agent '{agent}' lists {count} {kind} roles, at most {max} allowed")]
    TooManyPreferences {
        agent: String,
        kind: PreferenceKind,
        count: usize,
        max: usize,
    },
}

/// Which half of a preference record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKind {
    /// Liked roles.
    Positive,
    /// Disliked roles.
    Negative,
}

impl std::fmt::Display for PreferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferenceKind::Positive => f.write_str("liked"),
            PreferenceKind::Negative => f.write_str("disliked"),
        }
    }
}
