//! Exhaustive assignment search.
//!
//! Builds complete assignments one agent at a time, in the fixed order of
//! the [`PreferenceTable`](crate::model::PreferenceTable), over every role
//! that still has capacity. Each agent's placement adds +1 for a liked
//! role, -1 for a disliked one and 0 otherwise to the running score.
//!
//! # Key Components
//!
//! - [`SearchNode`]: write-once partial assignment with derived capacity
//! - [`Leaves`]: lazy depth-first generator of complete assignments
//! - [`SearchRunner`]: driver with limits, validation and an optional
//!   parallel mode
//!
//! # Traversal Order
//!
//! The traversal is LIFO. Children are pushed in requirement order, so the
//! last available role is explored first. Identical inputs always produce
//! identical output order, in both sequential and parallel mode.

mod config;
mod leaves;
mod node;
mod runner;

pub use config::SearchConfig;
pub use leaves::{Leaves, SearchStats};
pub use node::{NodeKind, SearchNode};
pub use runner::{SearchResult, SearchRunner};
