//! Reservation status transitions
//!
//! ```text
//!             user/staff: cancel
//!   Requested ───────────────────────▶ Cancelled
//!       │
//!       │ staff: approve
//!       ▼
//!   Approved ──staff: complete──▶ Completed
//! ```
//!
//! Cancelled and Completed are terminal. Any move not drawn above is rejected.

use serde::{Deserialize, Serialize};

use super::error::{LifecycleError, LifecycleResult};
use crate::models::{ReservationStatus, Role};

use ReservationStatus::{Approved, Cancelled, Completed, Requested};

/// (current status, role) -> permitted targets. Pairs not listed permit nothing.
const TRANSITIONS: &[(ReservationStatus, Role, &[ReservationStatus])] = &[
    (Requested, Role::User, &[Cancelled]),
    (Requested, Role::Staff, &[Approved, Cancelled]),
    (Approved, Role::Staff, &[Completed]),
];

const ROLES: [Role; 2] = [Role::User, Role::Staff];

/// Targets `role` may move a reservation in `from` to
pub fn permitted_targets(from: ReservationStatus, role: Role) -> &'static [ReservationStatus] {
    TRANSITIONS
        .iter()
        .find(|(status, r, _)| *status == from && *r == role)
        .map(|(_, _, targets)| *targets)
        .unwrap_or(&[])
}

pub fn can_transition(from: ReservationStatus, to: ReservationStatus, role: Role) -> bool {
    permitted_targets(from, role).contains(&to)
}

/// Validate a status move for `role`
///
/// A move some other role could make is `Unauthorized`; a move nobody can
/// make is `InvalidTransition`.
pub fn check_transition(
    from: ReservationStatus,
    to: ReservationStatus,
    role: Role,
) -> LifecycleResult<()> {
    if can_transition(from, to, role) {
        return Ok(());
    }
    if ROLES.iter().any(|r| can_transition(from, to, *r)) {
        return Err(LifecycleError::Unauthorized { role, from, to });
    }
    Err(LifecycleError::InvalidTransition { from, to })
}

/// Only the customer edits, and only while the reservation is Requested
pub fn can_edit(status: ReservationStatus, role: Role) -> bool {
    status == Requested && role == Role::User
}

pub fn check_edit(status: ReservationStatus, role: Role) -> LifecycleResult<()> {
    if role != Role::User {
        return Err(LifecycleError::EditForbidden(role));
    }
    if status != Requested {
        return Err(LifecycleError::NotEditable(status));
    }
    Ok(())
}

/// Things a front end may offer on a reservation row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Edit,
    Approve,
    Cancel,
    Complete,
}

impl Action {
    /// Status the action moves to; `Edit` keeps the status
    pub const fn target(&self) -> Option<ReservationStatus> {
        match self {
            Self::Edit => None,
            Self::Approve => Some(Approved),
            Self::Cancel => Some(Cancelled),
            Self::Complete => Some(Completed),
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Edit => "修改",
            Self::Approve => "确认",
            Self::Cancel => "取消",
            Self::Complete => "完成",
        }
    }

    fn for_target(status: ReservationStatus) -> Option<Self> {
        match status {
            Approved => Some(Self::Approve),
            Cancelled => Some(Self::Cancel),
            Completed => Some(Self::Complete),
            Requested => None,
        }
    }
}

/// Actions `role` may trigger on a reservation in `status`, edit first
pub fn available_actions(status: ReservationStatus, role: Role) -> Vec<Action> {
    let edit = can_edit(status, role).then_some(Action::Edit);
    edit.into_iter()
        .chain(
            permitted_targets(status, role)
                .iter()
                .filter_map(|target| Action::for_target(*target)),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_table_matches_rules() {
        let expected: [(ReservationStatus, Role, &[ReservationStatus]); 8] = [
            (Requested, Role::User, &[Cancelled]),
            (Requested, Role::Staff, &[Approved, Cancelled]),
            (Approved, Role::User, &[]),
            (Approved, Role::Staff, &[Completed]),
            (Cancelled, Role::User, &[]),
            (Cancelled, Role::Staff, &[]),
            (Completed, Role::User, &[]),
            (Completed, Role::Staff, &[]),
        ];
        for (from, role, targets) in expected {
            assert_eq!(permitted_targets(from, role), targets, "{from} as {role}");
            for to in ReservationStatus::ALL {
                let allowed = targets.contains(&to);
                assert_eq!(
                    check_transition(from, to, role).is_ok(),
                    allowed,
                    "{from} -> {to} as {role}"
                );
            }
        }
    }

    #[test]
    fn test_terminal_statuses_reject_everyone() {
        for from in [Cancelled, Completed] {
            for role in ROLES {
                for to in ReservationStatus::ALL {
                    let err = check_transition(from, to, role).unwrap_err();
                    assert!(matches!(err, LifecycleError::InvalidTransition { .. }));
                    assert_eq!(err.code(), ErrorCode::ReservationTerminal);
                }
            }
        }
    }

    #[test]
    fn test_user_cannot_approve_or_complete() {
        let err = check_transition(Requested, Approved, Role::User).unwrap_err();
        assert!(err.is_unauthorized());
        let err = check_transition(Approved, Completed, Role::User).unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.code(), ErrorCode::PermissionDenied);
    }

    #[test]
    fn test_staff_cannot_cancel_approved() {
        let err = check_transition(Approved, Cancelled, Role::Staff).unwrap_err();
        assert_eq!(err, LifecycleError::InvalidTransition { from: Approved, to: Cancelled });
        assert_eq!(err.code(), ErrorCode::InvalidTransition);
    }

    #[test]
    fn test_self_transition_is_invalid() {
        let err = check_transition(Requested, Requested, Role::Staff).unwrap_err();
        assert!(matches!(err, LifecycleError::InvalidTransition { .. }));
    }

    #[test]
    fn test_edit_gate() {
        assert!(check_edit(Requested, Role::User).is_ok());
        assert_eq!(
            check_edit(Requested, Role::Staff),
            Err(LifecycleError::EditForbidden(Role::Staff))
        );
        assert_eq!(check_edit(Approved, Role::User), Err(LifecycleError::NotEditable(Approved)));
        assert_eq!(check_edit(Cancelled, Role::User), Err(LifecycleError::NotEditable(Cancelled)));
    }

    #[test]
    fn test_available_actions() {
        assert_eq!(available_actions(Requested, Role::User), vec![Action::Edit, Action::Cancel]);
        assert_eq!(
            available_actions(Requested, Role::Staff),
            vec![Action::Approve, Action::Cancel]
        );
        assert_eq!(available_actions(Approved, Role::Staff), vec![Action::Complete]);
        assert!(available_actions(Approved, Role::User).is_empty());
        assert!(available_actions(Cancelled, Role::User).is_empty());
        assert!(available_actions(Completed, Role::Staff).is_empty());
    }

    #[test]
    fn test_action_targets_agree_with_table() {
        for from in ReservationStatus::ALL {
            for role in ROLES {
                for action in available_actions(from, role) {
                    match action.target() {
                        Some(to) => assert!(can_transition(from, to, role)),
                        None => assert!(can_edit(from, role)),
                    }
                }
            }
        }
    }
}
