//! Search configuration.

use crate::model::MAXIMUM_N_PREFERENCES;

/// Configuration for [`SearchRunner`](super::SearchRunner).
///
/// The defaults enumerate every complete assignment with no limits and no
/// up-front validation.
///
/// # Examples
///
/// ```
/// use u_assign::search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_max_leaves(100)
///     .with_validation(true)
///     .with_max_preferences(2);
/// assert_eq!(config.max_leaves, 100);
/// assert!(config.validate_input);
/// assert_eq!(config.max_nodes, 0);
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Stop after this many complete assignments. 0 = no limit.
    pub max_leaves: usize,
    /// Stop after visiting this many nodes. 0 = no limit.
    pub max_nodes: usize,
    /// Run [`validate_input`](crate::model::validate_input) before searching.
    pub validate_input: bool,
    /// Per-agent cap on liked and on disliked roles, used by validation.
    pub max_preferences: usize,
    /// Split the search across threads (requires the `parallel` feature).
    ///
    /// Ignored when `max_leaves` or `max_nodes` is set, since both limits
    /// depend on traversal order.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_leaves: 0,
            max_nodes: 0,
            validate_input: false,
            max_preferences: MAXIMUM_N_PREFERENCES,
            parallel: false,
        }
    }
}

impl SearchConfig {
    /// Sets the maximum number of complete assignments to return.
    pub fn with_max_leaves(mut self, n: usize) -> Self {
        self.max_leaves = n;
        self
    }

    /// Sets the node visit budget.
    pub fn with_max_nodes(mut self, n: usize) -> Self {
        self.max_nodes = n;
        self
    }

    /// Enables or disables input validation before the search.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate_input = validate;
        self
    }

    /// Sets the per-agent preference cap checked by validation.
    pub fn with_max_preferences(mut self, n: usize) -> Self {
        self.max_preferences = n;
        self
    }

    /// Enables or disables the parallel driver.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Whether any traversal-order-dependent limit is set.
    pub fn is_limited(&self) -> bool {
        self.max_leaves > 0 || self.max_nodes > 0
    }
}
