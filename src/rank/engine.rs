//! Rule composition engine for ranking and filtering complete assignments.

use super::types::{count_contributions, RankRule};
use crate::model::PreferenceTable;
use crate::search::SearchNode;
use std::cmp::Ordering;

/// How multiple rules are combined to produce a final ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationMode {
    /// Rules are applied in order. A later rule is only consulted
    /// when the previous rule produces a tie (within epsilon).
    Sequential,

    /// All rules contribute simultaneously via weighted sum.
    Weighted,
}

/// Strategy for breaking ties when all rules produce equal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep the traversal order (stable sort).
    PreserveOrder,

    /// Break ties by leaf index.
    ByIndex,
}

struct WeightedRule {
    rule: Box<dyn RankRule>,
    weight: f64,
}

type Filter = Box<dyn Fn(&SearchNode<'_>, &PreferenceTable) -> bool + Send + Sync>;

/// Ranks and filters the output of a search.
///
/// Filters run first and drop leaves outright; the remaining leaves are
/// sorted by the configured rules.
///
/// # Examples
///
/// ```
/// use u_assign::model::{Preference, PreferenceTable, Requirement};
/// use u_assign::rank::{FewestDislikes, HighestScore, RankEngine};
/// use u_assign::search::SearchRunner;
///
/// let req = Requirement::new().with_role("a", 1).with_role("b", 1);
/// let prefs = PreferenceTable::new()
///     .with_agent("x", Preference::new().liking("a"))
///     .with_agent("y", Preference::new().liking("b"));
/// let leaves = SearchRunner::enumerate(&req, &prefs).unwrap();
///
/// let engine = RankEngine::new()
///     .with_rule(HighestScore)
///     .with_rule(FewestDislikes)
///     .with_min_score(1);
/// let ranked = engine.rank(&leaves, &prefs);
/// assert_eq!(ranked.len(), 1);
/// assert_eq!(ranked[0].score(), 2);
/// ```
pub struct RankEngine {
    rules: Vec<WeightedRule>,
    filters: Vec<Filter>,
    mode: EvaluationMode,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RankEngine {
    /// Creates an engine with no rules, no filters, and sequential mode.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            filters: Vec::new(),
            mode: EvaluationMode::Sequential,
            tie_breaker: TieBreaker::PreserveOrder,
            epsilon: 1e-9,
        }
    }

    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_tie_breaker(mut self, tb: TieBreaker) -> Self {
        self.tie_breaker = tb;
        self
    }

    /// Sets the epsilon for floating-point comparison.
    pub fn with_epsilon(mut self, eps: f64) -> Self {
        self.epsilon = eps;
        self
    }

    /// Adds a rule with weight 1.0.
    pub fn with_rule<R: RankRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(WeightedRule {
            rule: Box::new(rule),
            weight: 1.0,
        });
        self
    }

    /// Adds a rule with a custom weight (for Weighted mode).
    pub fn with_weighted_rule<R: RankRule + 'static>(mut self, rule: R, weight: f64) -> Self {
        self.rules.push(WeightedRule {
            rule: Box::new(rule),
            weight,
        });
        self
    }

    /// Keeps only leaves whose score is at least `min`.
    pub fn with_min_score(self, min: i64) -> Self {
        self.with_filter(move |node, _| node.score() >= min)
    }

    /// Keeps only leaves where no agent holds a disliked role.
    pub fn without_dislikes(self) -> Self {
        self.with_filter(|node, prefs| count_contributions(node, prefs, -1) == 0)
    }

    /// Adds a custom filter; leaves for which it returns `false` are dropped.
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&SearchNode<'_>, &PreferenceTable) -> bool + Send + Sync + 'static,
    {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Returns the names of all rules in order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|wr| wr.rule.name()).collect()
    }

    /// In Sequential mode, one value per rule; in Weighted mode, the sum.
    fn compute_scores(&self, node: &SearchNode<'_>, preferences: &PreferenceTable) -> Vec<f64> {
        match self.mode {
            EvaluationMode::Sequential => self
                .rules
                .iter()
                .map(|wr| wr.rule.score(node, preferences))
                .collect(),
            EvaluationMode::Weighted => {
                let sum: f64 = self
                    .rules
                    .iter()
                    .map(|wr| wr.rule.score(node, preferences) * wr.weight)
                    .sum();
                vec![sum]
            }
        }
    }

    fn passes(&self, node: &SearchNode<'_>, preferences: &PreferenceTable) -> bool {
        self.filters.iter().all(|f| f(node, preferences))
    }

    /// Indices of leaves that pass every filter, in input order.
    pub fn filter_indices(&self, leaves: &[SearchNode<'_>], preferences: &PreferenceTable) -> Vec<usize> {
        leaves
            .iter()
            .enumerate()
            .filter(|(_, node)| self.passes(node, preferences))
            .map(|(i, _)| i)
            .collect()
    }

    /// Filters, then sorts by rule values (lowest first).
    ///
    /// Returns indices into `leaves`.
    pub fn rank_indices(&self, leaves: &[SearchNode<'_>], preferences: &PreferenceTable) -> Vec<usize> {
        let mut indices = self.filter_indices(leaves, preferences);
        if self.rules.is_empty() {
            return indices;
        }

        let scores: Vec<Vec<f64>> = leaves
            .iter()
            .map(|node| self.compute_scores(node, preferences))
            .collect();

        indices.sort_by(|&a, &b| {
            for (va, vb) in scores[a].iter().zip(&scores[b]) {
                if (va - vb).abs() > self.epsilon {
                    return va.partial_cmp(vb).unwrap_or(Ordering::Equal);
                }
            }

            match self.tie_breaker {
                TieBreaker::PreserveOrder => Ordering::Equal,
                TieBreaker::ByIndex => a.cmp(&b),
            }
        });

        indices
    }

    /// Filters and sorts, returning references in ranked order.
    pub fn rank<'s, 'n>(
        &self,
        leaves: &'s [SearchNode<'n>],
        preferences: &PreferenceTable,
    ) -> Vec<&'s SearchNode<'n>> {
        self.rank_indices(leaves, preferences)
            .into_iter()
            .map(|i| &leaves[i])
            .collect()
    }

    /// The `k` best-ranked leaves.
    pub fn top_k<'s, 'n>(
        &self,
        leaves: &'s [SearchNode<'n>],
        preferences: &PreferenceTable,
        k: usize,
    ) -> Vec<&'s SearchNode<'n>> {
        let mut ranked = self.rank(leaves, preferences);
        ranked.truncate(k);
        ranked
    }

    /// Index of the best-ranked leaf, or `None` if nothing passes the filters.
    pub fn select_best(&self, leaves: &[SearchNode<'_>], preferences: &PreferenceTable) -> Option<usize> {
        self.rank_indices(leaves, preferences).first().copied()
    }

    /// Composite value of a single leaf.
    ///
    /// In Weighted mode, returns the weighted sum.
    /// In Sequential mode, returns the first rule's value.
    pub fn score(&self, node: &SearchNode<'_>, preferences: &PreferenceTable) -> f64 {
        self.compute_scores(node, preferences)
            .first()
            .copied()
            .unwrap_or(0.0)
    }
}

impl Default for RankEngine {
    fn default() -> Self {
        Self::new()
    }
}
