use serde::{Deserialize, Serialize};
use steward_domain::Role;

/// A Policy decides which actions a `User` can and cannot take.
///
/// The `Policy` is derived from the `Role` the `User` holds in its church.
/// Every `UseCase` contains a list of `Permission`s that is required
/// for a `User` to execute it, if the `User`s `Policy` is not authorized
/// some of these `Permission`s the request will be rejected.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Policy {
    /// `Permission`s allowed by the `Policy`
    allow: Option<Vec<Permission>>,
    /// `Permission`s rejected by the `Policy`
    reject: Option<Vec<Permission>>,
}

impl Policy {
    pub fn for_role(role: Role) -> Self {
        let allow = match role {
            Role::Pastor | Role::Admin => vec![Permission::All],
            Role::Worker => vec![
                Permission::CreateReminder,
                Permission::AcknowledgeReminder,
                Permission::EscalateReminder,
                Permission::SendNotification,
                Permission::RaiseAlert,
            ],
            Role::Member => vec![
                Permission::CreateReminder,
                Permission::AcknowledgeReminder,
                Permission::EscalateReminder,
            ],
            Role::Guest => vec![Permission::CreateReminder, Permission::AcknowledgeReminder],
        };

        Self {
            allow: Some(allow),
            reject: None,
        }
    }

    /// Checks if this `Policy` has the right to list of `Permission`s
    pub fn authorize(&self, permissions: &[Permission]) -> bool {
        if permissions.is_empty() {
            return true;
        }

        if let Some(rejected) = &self.reject {
            for rejected_permission in rejected {
                if *rejected_permission == Permission::All {
                    return false;
                }
                if permissions.contains(rejected_permission) {
                    return false;
                }
            }
        }

        if let Some(allowed) = &self.allow {
            if allowed.contains(&Permission::All) {
                return true;
            }

            return permissions
                .iter()
                .all(|permission| allowed.contains(permission));
        }

        false
    }
}

/// `Permission` are different kind of actions that can be performed.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
pub enum Permission {
    #[serde(rename = "*")]
    All,
    CreateReminder,
    /// Create `Reminder`s owned by somebody else
    AssignReminder,
    AcknowledgeReminder,
    EscalateReminder,
    SendNotification,
    RaiseAlert,
    ManageRolePolicies,
    ManageEscalationRules,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn permissions() {
        let policy = Policy::default();
        assert!(policy.authorize(&[]));
        assert!(!policy.authorize(&[Permission::CreateReminder]));

        let policy = Policy {
            allow: Some(vec![Permission::All]),
            reject: None,
        };
        assert!(policy.authorize(&[Permission::ManageRolePolicies]));

        let policy = Policy {
            allow: Some(vec![Permission::All]),
            reject: Some(vec![Permission::RaiseAlert]),
        };
        assert!(!policy.authorize(&[Permission::RaiseAlert]));
        assert!(policy.authorize(&[Permission::CreateReminder]));

        let policy = Policy {
            allow: Some(vec![Permission::CreateReminder]),
            reject: Some(vec![Permission::All]),
        };
        assert!(!policy.authorize(&[Permission::CreateReminder]));

        let policy = Policy {
            allow: Some(vec![Permission::CreateReminder, Permission::AcknowledgeReminder]),
            reject: Some(vec![Permission::AcknowledgeReminder]),
        };
        assert!(policy.authorize(&[Permission::CreateReminder]));
        assert!(!policy.authorize(&[
            Permission::CreateReminder,
            Permission::AcknowledgeReminder
        ]));
    }

    #[test]
    fn role_policies() {
        for role in &[Role::Pastor, Role::Admin] {
            let policy = Policy::for_role(*role);
            assert!(policy.authorize(&[
                Permission::AssignReminder,
                Permission::ManageRolePolicies,
                Permission::ManageEscalationRules,
            ]));
        }

        let worker = Policy::for_role(Role::Worker);
        assert!(worker.authorize(&[Permission::SendNotification, Permission::RaiseAlert]));
        assert!(!worker.authorize(&[Permission::AssignReminder]));

        let member = Policy::for_role(Role::Member);
        assert!(member.authorize(&[Permission::EscalateReminder]));
        assert!(!member.authorize(&[Permission::RaiseAlert]));

        let guest = Policy::for_role(Role::Guest);
        assert!(guest.authorize(&[
            Permission::CreateReminder,
            Permission::AcknowledgeReminder
        ]));
        assert!(!guest.authorize(&[Permission::EscalateReminder]));
        assert!(!guest.authorize(&[Permission::ManageEscalationRules]));
    }
}
