// src/policy.rs
//! Role-based authorization. Every mutating handler goes through
//! [`authorize`]; there are no per-handler role comparisons.

use crate::error::AppError;
use crate::models::role::{ROLE_ADMIN, ROLE_SUPER_ADMIN, ROLE_USER, ROLE_USTADZ};
use crate::models::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateAnnouncement,
    UpdateAnnouncement,
    DeleteAnnouncement,
    CreateRundown,
    UpdateRundown,
    DeleteRundown,
    CreateRole,
    ListRoles,
    ListUstadz,
}

impl Action {
    /// Verb used in the "You not have access for ..." message.
    fn verb(self) -> &'static str {
        match self {
            Action::CreateAnnouncement | Action::CreateRundown | Action::CreateRole => "add",
            Action::UpdateAnnouncement | Action::UpdateRundown => "update",
            Action::DeleteAnnouncement | Action::DeleteRundown => "delete",
            Action::ListRoles | Action::ListUstadz => "list",
        }
    }
}

const ANNOUNCEMENT_EDITORS: &[&str] = &[ROLE_SUPER_ADMIN, ROLE_ADMIN];
const RUNDOWN_EDITORS: &[&str] = &[ROLE_SUPER_ADMIN, ROLE_ADMIN, ROLE_USTADZ];
const ROLE_MANAGERS: &[&str] = &[ROLE_SUPER_ADMIN, ROLE_ADMIN];
const EVERYONE: &[&str] = &[ROLE_SUPER_ADMIN, ROLE_ADMIN, ROLE_USTADZ, ROLE_USER];

const POLICY: &[(Action, &[&str])] = &[
    (Action::CreateAnnouncement, ANNOUNCEMENT_EDITORS),
    (Action::UpdateAnnouncement, ANNOUNCEMENT_EDITORS),
    (Action::DeleteAnnouncement, ANNOUNCEMENT_EDITORS),
    (Action::CreateRundown, RUNDOWN_EDITORS),
    (Action::UpdateRundown, RUNDOWN_EDITORS),
    (Action::DeleteRundown, RUNDOWN_EDITORS),
    (Action::CreateRole, ROLE_MANAGERS),
    (Action::ListRoles, ROLE_MANAGERS),
    (Action::ListUstadz, EVERYONE),
];

pub fn is_allowed(action: Action, role_name: &str) -> bool {
    POLICY
        .iter()
        .find(|(a, _)| *a == action)
        .is_some_and(|(_, roles)| roles.contains(&role_name))
}

pub fn authorize(user: &User, action: Action) -> Result<(), AppError> {
    if is_allowed(action, &user.role_name) {
        Ok(())
    } else {
        log::warn!(
            "user {} with role '{}' denied {:?}",
            user.id,
            user.role_name,
            action
        );
        Err(AppError::Forbidden(format!(
            "You not have access for {}",
            action.verb()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ACTIONS: [Action; 9] = [
        Action::CreateAnnouncement,
        Action::UpdateAnnouncement,
        Action::DeleteAnnouncement,
        Action::CreateRundown,
        Action::UpdateRundown,
        Action::DeleteRundown,
        Action::CreateRole,
        Action::ListRoles,
        Action::ListUstadz,
    ];

    #[test]
    fn every_action_has_a_row() {
        for action in ALL_ACTIONS {
            assert!(POLICY.iter().any(|(a, _)| *a == action), "{:?}", action);
        }
    }

    #[test]
    fn announcements_are_admin_only() {
        for action in [
            Action::CreateAnnouncement,
            Action::UpdateAnnouncement,
            Action::DeleteAnnouncement,
        ] {
            assert!(is_allowed(action, ROLE_ADMIN));
            assert!(is_allowed(action, ROLE_SUPER_ADMIN));
            assert!(!is_allowed(action, ROLE_USTADZ));
            assert!(!is_allowed(action, ROLE_USER));
        }
    }

    #[test]
    fn ustadz_may_manage_rundowns_but_user_may_not() {
        assert!(is_allowed(Action::CreateRundown, ROLE_USTADZ));
        assert!(is_allowed(Action::DeleteRundown, ROLE_USTADZ));
        assert!(!is_allowed(Action::UpdateRundown, ROLE_USER));
    }

    #[test]
    fn unknown_roles_are_denied_everything() {
        for action in ALL_ACTIONS {
            assert!(!is_allowed(action, "guest"));
        }
    }
}
