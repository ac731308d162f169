//! Ranking rules for complete assignments.

use crate::model::PreferenceTable;
use crate::search::SearchNode;

/// A rule that assigns a ranking value to a complete assignment.
///
/// Rules return `f64` values where **lower ranks first**, so "more is
/// better" quantities are negated.
///
/// # Examples
///
/// ```
/// use u_assign::model::PreferenceTable;
/// use u_assign::rank::RankRule;
/// use u_assign::search::SearchNode;
///
/// // Prefer assignments that give "nuker" to agents early in the table.
/// struct EarlyNuker;
///
/// impl RankRule for EarlyNuker {
///     fn name(&self) -> &str { "EarlyNuker" }
///     fn score(&self, node: &SearchNode<'_>, _prefs: &PreferenceTable) -> f64 {
///         node.assignment()
///             .iter()
///             .position(|(_, role)| role == "nuker")
///             .map_or(f64::INFINITY, |i| i as f64)
///     }
/// }
/// ```
pub trait RankRule: Send + Sync {
    /// Returns the name of this rule.
    fn name(&self) -> &str;

    /// Computes the ranking value of a complete assignment.
    fn score(&self, node: &SearchNode<'_>, preferences: &PreferenceTable) -> f64;
}

/// Counts agents whose contribution equals `sign`.
pub(crate) fn count_contributions(
    node: &SearchNode<'_>,
    preferences: &PreferenceTable,
    sign: i64,
) -> usize {
    node.assignment()
        .iter()
        .filter(|&(agent, role)| {
            preferences
                .get(agent)
                .is_some_and(|p| p.contribution(role) == sign)
        })
        .count()
}

/// Highest accumulated preference score first.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighestScore;

impl RankRule for HighestScore {
    fn name(&self) -> &str {
        "HighestScore"
    }

    fn score(&self, node: &SearchNode<'_>, _preferences: &PreferenceTable) -> f64 {
        -(node.score() as f64)
    }
}

/// Most agents on a liked role first.
#[derive(Debug, Clone, Copy, Default)]
pub struct MostLikes;

impl RankRule for MostLikes {
    fn name(&self) -> &str {
        "MostLikes"
    }

    fn score(&self, node: &SearchNode<'_>, preferences: &PreferenceTable) -> f64 {
        -(count_contributions(node, preferences, 1) as f64)
    }
}

/// Fewest agents on a disliked role first.
#[derive(Debug, Clone, Copy, Default)]
pub struct FewestDislikes;

impl RankRule for FewestDislikes {
    fn name(&self) -> &str {
        "FewestDislikes"
    }

    fn score(&self, node: &SearchNode<'_>, preferences: &PreferenceTable) -> f64 {
        count_contributions(node, preferences, -1) as f64
    }
}
