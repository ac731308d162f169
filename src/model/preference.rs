//! Agent preferences.

use indexmap::IndexMap;

/// Liked and disliked roles of one agent.
///
/// Preferences only affect scoring, never feasibility. The two lists are
/// expected to be disjoint; when a role appears in both, the like wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Preference {
    /// Roles the agent favors.
    #[cfg_attr(feature = "serde", serde(default))]
    pub positives: Vec<String>,
    /// Roles the agent disfavors.
    #[cfg_attr(feature = "serde", serde(default))]
    pub negatives: Vec<String>,
}

impl Preference {
    /// Creates a preference with no liked or disliked roles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a liked role.
    pub fn liking(mut self, role: impl Into<String>) -> Self {
        self.positives.push(role.into());
        self
    }

    /// Adds a disliked role.
    pub fn disliking(mut self, role: impl Into<String>) -> Self {
        self.negatives.push(role.into());
        self
    }

    /// Replaces the liked roles.
    pub fn with_positives<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.positives = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the disliked roles.
    pub fn with_negatives<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.negatives = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn likes(&self, role: &str) -> bool {
        self.positives.iter().any(|r| r == role)
    }

    pub fn dislikes(&self, role: &str) -> bool {
        self.negatives.iter().any(|r| r == role)
    }

    /// Score contribution of holding `role`: +1 liked, -1 disliked, else 0.
    pub fn contribution(&self, role: &str) -> i64 {
        if self.likes(role) {
            1
        } else if self.dislikes(role) {
            -1
        } else {
            0
        }
    }
}

/// Preferences of every agent, in the fixed order agents are placed.
///
/// # Examples
///
/// ```
/// use u_assign::model::{Preference, PreferenceTable};
///
/// let prefs = PreferenceTable::new()
///     .with_agent("x", Preference::new().liking("a"))
///     .with_agent("y", Preference::new().disliking("a"));
/// assert_eq!(prefs.agents().collect::<Vec<_>>(), vec!["x", "y"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PreferenceTable {
    agents: IndexMap<String, Preference>,
}

impl PreferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an agent (or replaces its preference in place).
    pub fn with_agent(mut self, agent: impl Into<String>, preference: Preference) -> Self {
        self.insert(agent, preference);
        self
    }

    pub fn insert(&mut self, agent: impl Into<String>, preference: Preference) {
        self.agents.insert(agent.into(), preference);
    }

    pub fn get(&self, agent: &str) -> Option<&Preference> {
        self.agents.get(agent)
    }

    /// Agent identifiers in placement order.
    pub fn agents(&self) -> impl Iterator<Item = &str> {
        self.agents.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Preference)> {
        self.agents.iter().map(|(a, p)| (a.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Preference)> for PreferenceTable {
    fn from_iter<I: IntoIterator<Item = (K, Preference)>>(iter: I) -> Self {
        Self {
            agents: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
