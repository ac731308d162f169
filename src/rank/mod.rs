//! Ranking and filtering of complete assignments.
//!
//! Composes [`RankRule`]s in sequence (lexicographic tie-breaking) or as a
//! weighted sum, and applies filters before sorting. Lower rule values rank
//! first.

mod engine;
mod types;

pub use engine::{EvaluationMode, RankEngine, TieBreaker};
pub use types::{FewestDislikes, HighestScore, MostLikes, RankRule};
