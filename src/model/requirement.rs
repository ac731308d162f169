//! Role requirements.

use indexmap::IndexMap;

/// Exact headcount per role, fixed for the whole search.
///
/// # Examples
///
/// ```
/// use u_assign::model::Requirement;
///
/// let req = Requirement::new()
///     .with_role("nuker", 3)
///     .with_role("healer", 1);
/// assert_eq!(req.total_slots(), 4);
/// assert_eq!(req.capacity("nuker"), Some(3));
/// assert_eq!(req.roles().collect::<Vec<_>>(), vec!["nuker", "healer"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Requirement {
    capacities: IndexMap<String, usize>,
}

impl Requirement {
    /// Creates an empty requirement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a role with the given capacity.
    pub fn with_role(mut self, role: impl Into<String>, capacity: usize) -> Self {
        self.insert(role, capacity);
        self
    }

    /// Sets the capacity of a role. Replacing keeps the original position.
    pub fn insert(&mut self, role: impl Into<String>, capacity: usize) {
        self.capacities.insert(role.into(), capacity);
    }

    /// Capacity of a role, or `None` if the role is not required.
    pub fn capacity(&self, role: &str) -> Option<usize> {
        self.capacities.get(role).copied()
    }

    /// Whether the role is part of this requirement.
    pub fn contains(&self, role: &str) -> bool {
        self.capacities.contains_key(role)
    }

    /// Role identifiers in insertion order.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.capacities.keys().map(String::as_str)
    }

    /// `(role, capacity)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.capacities.iter().map(|(r, &c)| (r.as_str(), c))
    }

    /// Sum of all capacities.
    pub fn total_slots(&self) -> usize {
        self.capacities.values().sum()
    }

    /// Number of distinct roles.
    pub fn len(&self) -> usize {
        self.capacities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capacities.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, usize)> for Requirement {
    fn from_iter<I: IntoIterator<Item = (K, usize)>>(iter: I) -> Self {
        Self {
            capacities: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
