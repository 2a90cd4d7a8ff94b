//! Status workflow engine.
//!
//! Validates a requested status change against the enumeration and the
//! configured [`TransitionPolicy`]. The engine is pure: persisting the new
//! status (and refreshing `updated_at`) is the store adapter's job.

use crate::enums::{ApplicationStatus, TransitionPolicy};
use crate::errors::CoreError;

/// Parse a raw status value supplied by a caller.
///
/// `None` and the empty string both count as "no value supplied".
///
/// # Errors
///
/// `CoreError::MissingField` when nothing was supplied,
/// `CoreError::UnknownStatus` when the value is not a member of the enumeration.
pub fn parse_requested(requested: Option<&str>) -> Result<ApplicationStatus, CoreError> {
    match requested {
        None | Some("") => Err(CoreError::missing("status")),
        Some(raw) => raw.parse(),
    }
}

/// Decide the status an application moves to.
///
/// Under [`TransitionPolicy::Unrestricted`] any member of the enumeration is
/// accepted regardless of `current`.
///
/// # Errors
///
/// `MissingField`, `UnknownStatus` (see [`parse_requested`]), or
/// `InvalidTransition` when the policy forbids `current → requested`.
pub fn apply_transition(
    id: &str,
    current: ApplicationStatus,
    requested: Option<&str>,
    policy: TransitionPolicy,
) -> Result<ApplicationStatus, CoreError> {
    let next = parse_requested(requested)?;
    check_transition(id, current, next, policy)?;
    Ok(next)
}

/// Check an already-parsed status change against `policy`.
///
/// # Errors
///
/// `CoreError::InvalidTransition` when the policy forbids `current → next`.
pub fn check_transition(
    id: &str,
    current: ApplicationStatus,
    next: ApplicationStatus,
    policy: TransitionPolicy,
) -> Result<(), CoreError> {
    if current.can_transition_to(next, policy) {
        return Ok(());
    }
    Err(CoreError::InvalidTransition {
        entity_type: "application".to_string(),
        id: id.to_string(),
        from: current.to_string(),
        to: next.to_string(),
    })
}

/// Status for a new submission: the supplied value, or the initial state.
///
/// # Errors
///
/// `CoreError::UnknownStatus` if a non-empty value is outside the enumeration.
pub fn initial_status(supplied: Option<&str>) -> Result<ApplicationStatus, CoreError> {
    match supplied {
        None | Some("") => Ok(ApplicationStatus::INITIAL),
        Some(raw) => raw.parse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn any_member_is_accepted_from_any_state() {
        for current in ApplicationStatus::ALL {
            for next in ApplicationStatus::ALL {
                let applied = apply_transition(
                    "app-1",
                    current,
                    Some(next.as_str()),
                    TransitionPolicy::Unrestricted,
                )
                .unwrap();
                assert_eq!(applied, next);
            }
        }
    }

    #[test]
    fn missing_status_is_rejected() {
        for requested in [None, Some("")] {
            let err = apply_transition(
                "app-1",
                ApplicationStatus::Submitted,
                requested,
                TransitionPolicy::Unrestricted,
            )
            .unwrap_err();
            assert_eq!(err, CoreError::missing("status"));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = apply_transition(
            "app-1",
            ApplicationStatus::Submitted,
            Some("Waitlisted"),
            TransitionPolicy::Unrestricted,
        )
        .unwrap_err();
        assert_eq!(err, CoreError::UnknownStatus("Waitlisted".into()));
    }

    #[test]
    fn final_decisions_policy_blocks_direct_reversal() {
        let err = apply_transition(
            "app-1",
            ApplicationStatus::Approved,
            Some("Rejected"),
            TransitionPolicy::FinalDecisions,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { ref from, ref to, .. }
            if from == "Approved" && to == "Rejected"));
    }

    #[test]
    fn initial_status_defaults_to_submitted() {
        assert_eq!(initial_status(None).unwrap(), ApplicationStatus::Submitted);
        assert_eq!(initial_status(Some("")).unwrap(), ApplicationStatus::Submitted);
        assert_eq!(
            initial_status(Some("Reviewing")).unwrap(),
            ApplicationStatus::Reviewing
        );
        assert!(initial_status(Some("Pending")).is_err());
    }
}
