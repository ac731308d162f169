//! Exhaustive capacity-constrained assignment of agents to roles.
//!
//! Given a fixed headcount per role and per-agent liked/disliked roles,
//! enumerates every way to seat all agents so that each role is filled
//! exactly, scores each seating (+1 per liked role held, -1 per disliked
//! role held), and ranks or filters the results.
//!
//! - **Model**: [`model::Requirement`], [`model::PreferenceTable`],
//!   [`model::Assignment`] and input validation.
//! - **Search**: depth-first enumeration over write-once
//!   [`search::SearchNode`]s, either collected by [`search::SearchRunner`]
//!   or streamed lazily through [`search::Leaves`].
//! - **Rank**: rule composition for ordering and filtering complete
//!   assignments.
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for model types
//! - `parallel`: split the search across the rayon pool
//! - `wasm`: JavaScript bindings
//!
//! # Examples
//!
//! ```
//! use u_assign::model::{Preference, PreferenceTable, Requirement};
//! use u_assign::search::{SearchConfig, SearchRunner};
//!
//! let req = Requirement::new().with_role("a", 1).with_role("b", 1);
//! let prefs = PreferenceTable::new()
//!     .with_agent("x", Preference::new().liking("a"))
//!     .with_agent("y", Preference::new().liking("b"));
//!
//! let result = SearchRunner::run(&req, &prefs, &SearchConfig::default()).unwrap();
//! let best = result.best().unwrap();
//! assert_eq!(best.score(), 2);
//! assert_eq!(best.to_string(), "STATE: {x: a, y: b} || SCORE: 2");
//! ```

pub mod error;
pub mod model;
pub mod rank;
pub mod search;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::AssignError;
