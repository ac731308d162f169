//! Exhaustive search driver.
//!
//! # Algorithm
//!
//! 1. Push the empty root onto a stack
//! 2. Pop a node:
//!    a. If every agent is placed and every role filled exactly, collect it
//!    b. Expand the first unassigned agent over every open role and push
//!       the children
//! 3. Repeat until the stack is empty (or a configured limit is hit)
//!
//! No pruning is applied; every capacity-respecting branch is visited.

use super::config::SearchConfig;
use super::leaves::{Leaves, SearchStats};
use super::node::SearchNode;
use crate::error::AssignError;
use crate::model::{validate_input, CompleteAssignment, PreferenceTable, Requirement};
use tracing::{debug, warn};

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchResult<'a> {
    /// Complete assignments in traversal order.
    pub leaves: Vec<SearchNode<'a>>,
    /// Traversal counters.
    pub stats: SearchStats,
    /// Whether a limit stopped the search before the tree was exhausted.
    pub truncated: bool,
}

impl<'a> SearchResult<'a> {
    /// Highest-scoring leaf; the earliest one in traversal order on ties.
    pub fn best(&self) -> Option<&SearchNode<'a>> {
        self.leaves
            .iter()
            .reduce(|best, node| if node.score() > best.score() { node } else { best })
    }

    /// Detaches the leaves from the borrowed requirement.
    pub fn into_complete(self) -> Vec<CompleteAssignment> {
        self.leaves
            .into_iter()
            .map(SearchNode::into_complete)
            .collect()
    }
}

/// Exhaustive assignment search.
pub struct SearchRunner;

impl SearchRunner {
    /// Enumerates every complete assignment with default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_assign::model::{Preference, PreferenceTable, Requirement};
    /// use u_assign::search::SearchRunner;
    ///
    /// let req = Requirement::new().with_role("a", 1).with_role("b", 1);
    /// let prefs = PreferenceTable::new()
    ///     .with_agent("x", Preference::new().liking("a"))
    ///     .with_agent("y", Preference::new().liking("b"));
    ///
    /// let leaves = SearchRunner::enumerate(&req, &prefs).unwrap();
    /// assert_eq!(leaves.len(), 2);
    /// assert!(leaves.iter().any(|n| n.score() == 2));
    /// ```
    pub fn enumerate<'a>(
        requirement: &'a Requirement,
        preferences: &'a PreferenceTable,
    ) -> Result<Vec<SearchNode<'a>>, AssignError> {
        Ok(Self::run(requirement, preferences, &SearchConfig::default())?.leaves)
    }

    /// Runs the search.
    ///
    /// # Errors
    ///
    /// Validation errors when `config.validate_input` is set, and node
    /// construction errors should an expansion ever over-fill a role.
    pub fn run<'a>(
        requirement: &'a Requirement,
        preferences: &'a PreferenceTable,
        config: &SearchConfig,
    ) -> Result<SearchResult<'a>, AssignError> {
        if config.validate_input {
            validate_input(requirement, preferences, config.max_preferences)?;
        }

        debug!(
            agents = preferences.len(),
            roles = requirement.len(),
            slots = requirement.total_slots(),
            "starting assignment search"
        );

        let result = if config.parallel && !config.is_limited() {
            Self::run_parallel(requirement, preferences)?
        } else {
            Self::run_sequential(requirement, preferences, config)?
        };

        if result.truncated {
            warn!(
                leaves = result.leaves.len(),
                nodes = result.stats.nodes_explored,
                max_leaves = config.max_leaves,
                max_nodes = config.max_nodes,
                "assignment search stopped by limit"
            );
        }
        debug!(
            leaves = result.stats.leaves,
            nodes = result.stats.nodes_explored,
            dead_ends = result.stats.dead_ends,
            underfilled = result.stats.underfilled,
            "assignment search finished"
        );

        Ok(result)
    }

    fn run_sequential<'a>(
        requirement: &'a Requirement,
        preferences: &'a PreferenceTable,
        config: &SearchConfig,
    ) -> Result<SearchResult<'a>, AssignError> {
        let mut leaves = Leaves::new(requirement, preferences).with_node_limit(config.max_nodes);
        let mut found = Vec::new();

        for leaf in leaves.by_ref() {
            found.push(leaf?);
            if config.max_leaves > 0 && found.len() >= config.max_leaves {
                break;
            }
        }

        Ok(SearchResult {
            leaves: found,
            stats: leaves.stats().clone(),
            truncated: !leaves.is_exhausted(),
        })
    }

    /// Expands the root once and searches each child subtree on the rayon
    /// pool. Subtrees are merged in the order the sequential driver would
    /// pop them, so the output matches [`run_sequential`](Self::run_sequential).
    #[cfg(feature = "parallel")]
    fn run_parallel<'a>(
        requirement: &'a Requirement,
        preferences: &'a PreferenceTable,
    ) -> Result<SearchResult<'a>, AssignError> {
        use rayon::prelude::*;

        let mut head = Leaves::new(requirement, preferences);
        let mut found = Vec::new();
        let Some(root) = head.take_pending().pop() else {
            return Ok(SearchResult {
                leaves: found,
                stats: SearchStats::default(),
                truncated: false,
            });
        };
        if let Some(leaf) = head.visit(root)? {
            found.push(leaf);
        }

        let mut stats = head.stats().clone();
        let subtrees = head.take_pending();

        let parts: Vec<Result<(Vec<SearchNode<'a>>, SearchStats), AssignError>> = subtrees
            .into_par_iter()
            .map(|node| -> Result<_, AssignError> {
                let mut leaves = Leaves::from_node(node, preferences);
                let found = leaves.by_ref().collect::<Result<Vec<_>, _>>()?;
                Ok((found, leaves.stats().clone()))
            })
            .collect();

        // The sequential stack pops the last-pushed subtree first.
        for part in parts.into_iter().rev() {
            let (leaves, part_stats) = part?;
            found.extend(leaves);
            stats.merge(&part_stats);
        }

        Ok(SearchResult {
            leaves: found,
            stats,
            truncated: false,
        })
    }

    #[cfg(not(feature = "parallel"))]
    fn run_parallel<'a>(
        requirement: &'a Requirement,
        preferences: &'a PreferenceTable,
    ) -> Result<SearchResult<'a>, AssignError> {
        debug!("parallel feature disabled, searching sequentially");
        Self::run_sequential(requirement, preferences, &SearchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{score_assignment, Assignment, Preference};
    use proptest::prelude::*;
    use std::collections::HashSet;

    // ---- Fixed nine-agent roster ----

    fn roster_requirement() -> Requirement {
        Requirement::new()
            .with_role("nuker", 3)
            .with_role("bd", 1)
            .with_role("sws", 1)
            .with_role("bp", 1)
            .with_role("ol", 1)
            .with_role("ee", 1)
            .with_role("se", 1)
    }

    fn roster_preferences() -> PreferenceTable {
        PreferenceTable::new()
            .with_agent(
                "mysticism",
                Preference::new()
                    .with_positives(["nuker", "bd"])
                    .with_negatives(["sws"]),
            )
            .with_agent("ttl", Preference::new().liking("nuker"))
            .with_agent("vella", Preference::new().liking("ee"))
            .with_agent("fortuna", Preference::new().liking("sws"))
            .with_agent("noveria", Preference::new().liking("sws").disliking("bp"))
            .with_agent("maria", Preference::new().with_positives(["nuker", "bd"]))
            .with_agent("melz", Preference::new().disliking("ee"))
            .with_agent("emperior", Preference::new().liking("ol"))
            .with_agent("jet", Preference::new().liking("nuker"))
    }

    fn assert_complete(leaf: &SearchNode<'_>, req: &Requirement, prefs: &PreferenceTable) {
        for (role, capacity) in req.iter() {
            assert_eq!(leaf.assignment().count_for(role), capacity, "role {role}");
        }
        assert_eq!(leaf.assignment().len(), prefs.len());
        for agent in prefs.agents() {
            assert!(leaf.assignment().contains_agent(agent), "agent {agent}");
        }
        assert_eq!(leaf.score(), score_assignment(leaf.assignment(), prefs));
    }

    #[test]
    fn test_two_agents_two_roles() {
        let req = Requirement::new().with_role("a", 1).with_role("b", 1);
        let prefs = PreferenceTable::new()
            .with_agent("x", Preference::new().liking("a"))
            .with_agent("y", Preference::new().liking("b"));

        let leaves = SearchRunner::enumerate(&req, &prefs).unwrap();
        assert_eq!(leaves.len(), 2);

        let straight = Assignment::new().with("x", "a").with("y", "b");
        let swapped = Assignment::new().with("x", "b").with("y", "a");
        let by_assignment = |a: &Assignment| leaves.iter().find(|n| n.assignment() == a).unwrap();
        assert_eq!(by_assignment(&straight).score(), 2);
        assert_eq!(by_assignment(&swapped).score(), 0);
    }

    #[test]
    fn test_single_slot_two_agents() {
        let req = Requirement::new().with_role("a", 1);
        let prefs = PreferenceTable::new()
            .with_agent("x", Preference::new().liking("a"))
            .with_agent("y", Preference::new().disliking("a"));

        let result = SearchRunner::run(&req, &prefs, &SearchConfig::default()).unwrap();
        assert!(result.leaves.is_empty());
        assert_eq!(result.stats.dead_ends, 1);
        assert!(!result.truncated);
        assert!(result.best().is_none());
    }

    #[test]
    fn test_single_slot_rejected_by_validation() {
        let req = Requirement::new().with_role("a", 1);
        let prefs = PreferenceTable::new()
            .with_agent("x", Preference::new().liking("a"))
            .with_agent("y", Preference::new().disliking("a"));

        let config = SearchConfig::default().with_validation(true);
        let err = SearchRunner::run(&req, &prefs, &config).unwrap_err();
        assert_eq!(err, AssignError::SlotMismatch { agents: 2, slots: 1 });
    }

    #[test]
    fn test_roster_is_exhaustive() {
        let req = roster_requirement();
        let prefs = roster_preferences();
        let result = SearchRunner::run(&req, &prefs, &SearchConfig::default()).unwrap();

        // 9! / 3! ways to seat nine agents on three identical and six distinct slots.
        assert_eq!(result.leaves.len(), 60_480);
        assert_eq!(result.stats.leaves, 60_480);
        assert!(!result.truncated);

        let distinct: HashSet<String> = result
            .leaves
            .iter()
            .map(|n| n.assignment().to_string())
            .collect();
        assert_eq!(distinct.len(), result.leaves.len());

        for leaf in &result.leaves {
            assert_complete(leaf, &req, &prefs);
        }
    }

    #[test]
    fn test_roster_best_score() {
        let req = roster_requirement();
        let prefs = roster_preferences();
        let result = SearchRunner::run(&req, &prefs, &SearchConfig::default()).unwrap();

        let best = result.best().unwrap();
        assert_eq!(best.score(), 7);
        let optimal = result.leaves.iter().filter(|n| n.score() == 7).count();
        assert_eq!(optimal, 6);
        assert!(result.leaves.iter().all(|n| n.score() <= 7));
    }

    #[test]
    fn test_roster_passes_validation() {
        let req = roster_requirement();
        let prefs = roster_preferences();
        assert!(validate_input(&req, &prefs, 3).is_ok());
    }

    #[test]
    fn test_max_leaves() {
        let req = roster_requirement();
        let prefs = roster_preferences();
        let config = SearchConfig::default().with_max_leaves(10);
        let result = SearchRunner::run(&req, &prefs, &config).unwrap();

        assert_eq!(result.leaves.len(), 10);
        assert!(result.truncated);

        let full = SearchRunner::enumerate(&req, &prefs).unwrap();
        for (a, b) in result.leaves.iter().zip(&full) {
            assert_eq!(a.assignment(), b.assignment());
        }
    }

    #[test]
    fn test_max_nodes() {
        let req = roster_requirement();
        let prefs = roster_preferences();
        let config = SearchConfig::default().with_max_nodes(50);
        let result = SearchRunner::run(&req, &prefs, &config).unwrap();

        assert_eq!(result.stats.nodes_explored, 50);
        assert!(result.truncated);
    }

    #[test]
    fn test_deterministic() {
        let req = roster_requirement();
        let prefs = roster_preferences();
        let a = SearchRunner::enumerate(&req, &prefs).unwrap();
        let b = SearchRunner::enumerate(&req, &prefs).unwrap();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.assignment(), y.assignment());
            assert_eq!(x.score(), y.score());
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let req = Requirement::new()
            .with_role("a", 2)
            .with_role("b", 1)
            .with_role("c", 2);
        let prefs: PreferenceTable = ["p", "q", "r", "s", "t"]
            .into_iter()
            .map(|a| (a, Preference::new().liking("b")))
            .collect();

        let sequential = SearchRunner::run(&req, &prefs, &SearchConfig::default()).unwrap();
        let parallel = SearchRunner::run(
            &req,
            &prefs,
            &SearchConfig::default().with_parallel(true),
        )
        .unwrap();

        assert_eq!(sequential.leaves.len(), 30);
        assert_eq!(sequential.leaves.len(), parallel.leaves.len());
        for (x, y) in sequential.leaves.iter().zip(&parallel.leaves) {
            assert_eq!(x.assignment(), y.assignment());
            assert_eq!(x.score(), y.score());
        }
        assert_eq!(sequential.stats.nodes_explored, parallel.stats.nodes_explored);
        assert_eq!(sequential.stats.leaves, parallel.stats.leaves);
    }

    #[test]
    fn test_into_complete() {
        let req = Requirement::new().with_role("a", 1).with_role("b", 1);
        let prefs = PreferenceTable::new()
            .with_agent("x", Preference::new().liking("a"))
            .with_agent("y", Preference::new());
        let result = SearchRunner::run(&req, &prefs, &SearchConfig::default()).unwrap();
        let complete = result.into_complete();
        assert_eq!(complete.len(), 2);
        assert!(complete.iter().any(|c| c.score == 1));
    }

    // ---- Properties over small random instances ----

    fn multinomial(n: usize, parts: &[usize]) -> usize {
        let fact = |k: usize| (1..=k).product::<usize>();
        parts.iter().fold(fact(n), |acc, &p| acc / fact(p))
    }

    fn instance() -> impl Strategy<Value = (Vec<usize>, Vec<(Vec<usize>, Vec<usize>)>)> {
        prop::collection::vec(0usize..3, 1..4).prop_flat_map(|caps| {
            let roles = caps.len();
            let agents = caps.iter().sum::<usize>().max(1);
            let pref = (
                prop::collection::vec(0..roles, 0..3),
                prop::collection::vec(0..roles, 0..3),
            );
            (Just(caps), prop::collection::vec(pref, agents..=agents))
        })
    }

    fn build(
        caps: &[usize],
        agents: &[(Vec<usize>, Vec<usize>)],
    ) -> (Requirement, PreferenceTable) {
        let req = caps
            .iter()
            .enumerate()
            .map(|(i, &c)| (format!("r{i}"), c))
            .collect();
        let prefs = agents
            .iter()
            .enumerate()
            .map(|(i, (pos, neg))| {
                (
                    format!("g{i}"),
                    Preference::new()
                        .with_positives(pos.iter().map(|r| format!("r{r}")))
                        .with_negatives(neg.iter().map(|r| format!("r{r}"))),
                )
            })
            .collect();
        (req, prefs)
    }

    proptest! {
        #[test]
        fn prop_leaves_are_complete_and_scored((caps, agents) in instance()) {
            let (req, prefs) = build(&caps, &agents);
            let leaves = SearchRunner::enumerate(&req, &prefs).unwrap();
            for leaf in &leaves {
                for (role, capacity) in req.iter() {
                    prop_assert_eq!(leaf.assignment().count_for(role), capacity);
                }
                prop_assert_eq!(leaf.assignment().len(), prefs.len());
                prop_assert_eq!(leaf.score(), score_assignment(leaf.assignment(), &prefs));
            }
        }

        #[test]
        fn prop_leaf_count_is_multinomial((caps, agents) in instance()) {
            let (req, prefs) = build(&caps, &agents);
            let leaves = SearchRunner::enumerate(&req, &prefs).unwrap();
            let expected = if prefs.len() == req.total_slots() {
                multinomial(prefs.len(), &caps)
            } else {
                0
            };
            prop_assert_eq!(leaves.len(), expected);

            let distinct: HashSet<String> =
                leaves.iter().map(|n| n.assignment().to_string()).collect();
            prop_assert_eq!(distinct.len(), leaves.len());
        }

        #[test]
        fn prop_no_node_over_capacity((caps, agents) in instance()) {
            let (req, prefs) = build(&caps, &agents);
            let mut stack = vec![SearchNode::root(&req)];
            while let Some(node) = stack.pop() {
                for (role, capacity) in req.iter() {
                    prop_assert!(node.assignment().count_for(role) <= capacity);
                }
                prop_assert_eq!(node.is_valid(node.assignment()), Ok(true));
                stack.extend(node.children(&prefs).unwrap());
            }
        }
    }
}
