//! Problem data: role requirements, agent preferences, and assignments.
//!
//! All collections here are insertion-ordered. The order of a
//! [`PreferenceTable`] is the order in which the search places agents, and
//! the order of a [`Requirement`] is the order in which candidate roles are
//! generated, so identical inputs always enumerate identically.
//!
//! # Key Components
//!
//! - [`Requirement`]: role → exact headcount
//! - [`Preference`] / [`PreferenceTable`]: per-agent liked and disliked roles
//! - [`Assignment`]: agent → role, extended one pair at a time
//! - [`validate_input`]: shape check to run before searching

mod assignment;
mod preference;
mod requirement;
mod validate;

pub use assignment::{score_assignment, Assignment, CompleteAssignment};
pub use preference::{Preference, PreferenceTable};
pub use requirement::Requirement;
pub use validate::{validate_input, MAXIMUM_N_PREFERENCES};
