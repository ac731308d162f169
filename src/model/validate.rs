//! Input shape validation.

use super::preference::PreferenceTable;
use super::requirement::Requirement;
use crate::error::{AssignError, PreferenceKind};
use tracing::debug;

/// Default cap on liked (and, separately, disliked) roles per agent.
pub const MAXIMUM_N_PREFERENCES: usize = 3;

/// Checks that a requirement and preference table can be searched.
///
/// Agents are checked in table order; the first problem found is returned.
/// Rejects:
///
/// - more than `max_preferences` liked or disliked roles on one agent
/// - a liked or disliked role absent from the requirement
/// - an agent count different from the total number of slots
///
/// Overlap between an agent's liked and disliked roles is allowed.
pub fn validate_input(
    requirement: &Requirement,
    preferences: &PreferenceTable,
    max_preferences: usize,
) -> Result<(), AssignError> {
    let result = check(requirement, preferences, max_preferences);
    if let Err(err) = &result {
        debug!(error = %err, "input validation failed");
    }
    result
}

fn check(
    requirement: &Requirement,
    preferences: &PreferenceTable,
    max_preferences: usize,
) -> Result<(), AssignError> {
    for (agent, preference) in preferences.iter() {
        for (kind, roles) in [
            (PreferenceKind::Positive, &preference.positives),
            (PreferenceKind::Negative, &preference.negatives),
        ] {
            if roles.len() > max_preferences {
                return Err(AssignError::TooManyPreferences {
                    agent: agent.to_string(),
                    kind,
                    count: roles.len(),
                    max: max_preferences,
                });
            }
            if let Some(role) = roles.iter().find(|r| !requirement.contains(r)) {
                return Err(AssignError::UnknownRole {
                    agent: agent.to_string(),
                    role: role.clone(),
                });
            }
        }
    }

    let slots = requirement.total_slots();
    if preferences.len() != slots {
        return Err(AssignError::SlotMismatch {
            agents: preferences.len(),
            slots,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Preference;

    fn requirement() -> Requirement {
        Requirement::new().with_role("a", 1).with_role("b", 1)
    }

    #[test]
    fn test_valid_input() {
        let prefs = PreferenceTable::new()
            .with_agent("x", Preference::new().liking("a"))
            .with_agent("y", Preference::new().liking("b").disliking("a"));
        assert!(validate_input(&requirement(), &prefs, MAXIMUM_N_PREFERENCES).is_ok());
    }

    #[test]
    fn test_unknown_role() {
        let prefs = PreferenceTable::new()
            .with_agent("x", Preference::new())
            .with_agent("y", Preference::new().disliking("c"));
        let err = validate_input(&requirement(), &prefs, MAXIMUM_N_PREFERENCES).unwrap_err();
        assert_eq!(
            err,
            AssignError::UnknownRole {
                agent: "y".into(),
                role: "c".into()
            }
        );
    }

    #[test]
    fn test_slot_mismatch() {
        let prefs = PreferenceTable::new()
            .with_agent("x", Preference::new())
            .with_agent("y", Preference::new())
            .with_agent("z", Preference::new());
        let err = validate_input(&requirement(), &prefs, MAXIMUM_N_PREFERENCES).unwrap_err();
        assert_eq!(err, AssignError::SlotMismatch { agents: 3, slots: 2 });

        let short = PreferenceTable::new().with_agent("x", Preference::new());
        let err = validate_input(&requirement(), &short, MAXIMUM_N_PREFERENCES).unwrap_err();
        assert_eq!(err, AssignError::SlotMismatch { agents: 1, slots: 2 });
    }

    #[test]
    fn test_too_many_preferences() {
        let req = Requirement::new()
            .with_role("a", 1)
            .with_role("b", 1)
            .with_role("c", 1)
            .with_role("d", 1);
        let prefs = PreferenceTable::new()
            .with_agent("w", Preference::new())
            .with_agent("x", Preference::new().with_negatives(["a", "b", "c", "d"]))
            .with_agent("y", Preference::new())
            .with_agent("z", Preference::new());

        let err = validate_input(&req, &prefs, 3).unwrap_err();
        assert_eq!(
            err,
            AssignError::TooManyPreferences {
                agent: "x".into(),
                kind: PreferenceKind::Negative,
                count: 4,
                max: 3
            }
        );
        assert!(validate_input(&req, &prefs, 4).is_ok());
    }

    #[test]
    fn test_overlap_allowed() {
        let prefs = PreferenceTable::new()
            .with_agent("x", Preference::new().liking("a").disliking("a"))
            .with_agent("y", Preference::new());
        assert!(validate_input(&requirement(), &prefs, MAXIMUM_N_PREFERENCES).is_ok());
    }
}
