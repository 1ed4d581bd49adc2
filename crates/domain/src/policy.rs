use crate::{offset::ReminderOffset, shared::entity::ID};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

text_enum! {
    /// The role a member holds in their church. Decides which reminder
    /// lead times, snooze limit and escalation target apply to them.
    pub enum Role {
        Guest => "guest",
        Member => "member",
        Worker => "worker",
        Admin => "admin",
        Pastor => "pastor",
    }
}

/// Reminder behaviour for one `Role`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePolicy {
    /// Lead times before the due time at which a `Reminder` should trigger,
    /// ordered from the longest to the shortest lead time.
    pub offsets: Vec<ReminderOffset>,
    /// Supervisor role that unacknowledged `Reminder`s are escalated to.
    /// `None` means escalation is not allowed for this role.
    pub escalate_to: Option<Role>,
    /// Maximum number of times a `Reminder` can be snoozed
    pub snooze_limit: i64,
}

impl RolePolicy {
    pub fn new(offsets: &[&str], escalate_to: Option<Role>, snooze_limit: i64) -> Self {
        let offsets = offsets
            .iter()
            .filter_map(|token| token.parse().ok())
            .collect();
        Self {
            offsets,
            escalate_to,
            snooze_limit,
        }
    }

    /// Orders the offsets from the longest to the shortest lead time
    pub fn sort_offsets(&mut self) {
        self.offsets.sort_by(|a, b| b.millis().cmp(&a.millis()));
        self.offsets.dedup();
    }
}

/// The policy table for every `Role`.
///
/// Loaded once at startup and passed explicitly to whoever needs it,
/// `TenantRolePolicy`s stored per church take precedence over it.
#[derive(Debug, Clone, PartialEq)]
pub struct RolePolicies {
    policies: HashMap<Role, RolePolicy>,
}

impl RolePolicies {
    pub fn get(&self, role: Role) -> &RolePolicy {
        // Every role is present, enforced by the constructors
        &self.policies[&role]
    }

    pub fn with_policy(mut self, role: Role, policy: RolePolicy) -> Self {
        self.policies.insert(role, policy);
        self
    }
}

impl Default for RolePolicies {
    fn default() -> Self {
        let mut policies = HashMap::new();
        policies.insert(
            Role::Pastor,
            RolePolicy::new(&["24h", "1h", "15m"], Some(Role::Admin), 5),
        );
        policies.insert(Role::Admin, RolePolicy::new(&["24h", "1h", "15m"], None, 5));
        policies.insert(
            Role::Worker,
            RolePolicy::new(&["12h", "1h"], Some(Role::Admin), 3),
        );
        policies.insert(Role::Member, RolePolicy::new(&["24h", "2h"], None, 2));
        policies.insert(Role::Guest, RolePolicy::new(&["24h", "2h"], None, 1));
        Self { policies }
    }
}

/// A church specific override of the default `RolePolicy` for a `Role`
#[derive(Debug, Clone, PartialEq)]
pub struct TenantRolePolicy {
    pub church_id: ID,
    pub role: Role,
    pub policy: RolePolicy,
    pub updated: i64,
}

#[cfg(test)]
mod test {
    use super::*;

    fn tokens(policy: &RolePolicy) -> Vec<&str> {
        policy.offsets.iter().map(|o| o.token()).collect()
    }

    #[test]
    fn default_table_covers_every_role() {
        let policies = RolePolicies::default();
        for role in Role::ALL {
            policies.get(*role);
        }

        let worker = policies.get(Role::Worker);
        assert_eq!(tokens(worker), vec!["12h", "1h"]);
        assert_eq!(worker.escalate_to, Some(Role::Admin));
        assert_eq!(worker.snooze_limit, 3);

        let pastor = policies.get(Role::Pastor);
        assert_eq!(tokens(pastor), vec!["24h", "1h", "15m"]);
        assert_eq!(pastor.escalate_to, Some(Role::Admin));

        assert_eq!(policies.get(Role::Admin).escalate_to, None);
        assert_eq!(policies.get(Role::Guest).snooze_limit, 1);
        assert_eq!(policies.get(Role::Member).snooze_limit, 2);
    }

    #[test]
    fn sorts_offsets_longest_first() {
        let mut policy = RolePolicy::new(&["15m", "2d", "1h", "15m"], None, 1);
        policy.sort_offsets();
        assert_eq!(tokens(&policy), vec!["2d", "1h", "15m"]);
    }

    #[test]
    fn role_round_trips_through_text() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), *role);
        }
        assert!("bishop".parse::<Role>().is_err());
    }
}
