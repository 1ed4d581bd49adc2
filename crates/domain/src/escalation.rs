use crate::{
    policy::Role,
    reminder::{Priority, Reminder, ReminderType},
    shared::entity::{Entity, ID},
};
use thiserror::Error;

const MINUTE: i64 = 1000 * 60;

/// Upper bound of `EscalationRule::escalate_after_minutes`, one year
pub const MAX_ESCALATE_AFTER_MINUTES: i64 = 60 * 24 * 365;

text_enum! {
    pub enum EscalationStatus {
        Pending => "pending",
        Acknowledged => "acknowledged",
        Resolved => "resolved",
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EscalationStateError {
    #[error("Escalation can not move from {from} to {to}")]
    InvalidTransition {
        from: EscalationStatus,
        to: EscalationStatus,
    },
}

/// Audit record of a `Reminder` being handed over to a supervisor
#[derive(Debug, Clone, PartialEq)]
pub struct EscalationLog {
    pub id: ID,
    pub reminder_id: ID,
    pub escalated_from: ID,
    pub escalated_to: ID,
    pub reason: Option<String>,
    pub status: EscalationStatus,
    pub resolved_at: Option<i64>,
    pub created: i64,
}

impl EscalationLog {
    pub fn new(
        reminder_id: &ID,
        escalated_from: &ID,
        escalated_to: &ID,
        reason: Option<String>,
        now: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            reminder_id: reminder_id.clone(),
            escalated_from: escalated_from.clone(),
            escalated_to: escalated_to.clone(),
            reason,
            status: EscalationStatus::Pending,
            resolved_at: None,
            created: now,
        }
    }

    /// Moves the log forward: `pending -> acknowledged -> resolved`,
    /// or straight from `pending` to `resolved`.
    /// Setting the current status again is a no-op.
    pub fn set_status(
        &mut self,
        status: EscalationStatus,
        now: i64,
    ) -> Result<(), EscalationStateError> {
        if self.status == status {
            return Ok(());
        }
        if self.status > status || self.status == EscalationStatus::Resolved {
            return Err(EscalationStateError::InvalidTransition {
                from: self.status,
                to: status,
            });
        }
        self.status = status;
        if status == EscalationStatus::Resolved {
            self.resolved_at = Some(now);
        }
        Ok(())
    }
}

impl Entity for EscalationLog {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Church specific rule telling the overdue sweep how long to wait
/// after a `Reminder` is due before escalating it.
///
/// Who it is escalated to comes from the owner's `RolePolicy`.
#[derive(Debug, Clone, PartialEq)]
pub struct EscalationRule {
    pub id: ID,
    pub church_id: ID,
    pub source_role: Role,
    pub escalate_after_minutes: i64,
    /// Only applies to `Reminder`s of this type when set
    pub reminder_type: Option<ReminderType>,
    /// Only applies to `Reminder`s with this priority when set
    pub priority: Option<Priority>,
    pub active: bool,
    pub created: i64,
}

impl EscalationRule {
    pub fn applies_to(&self, reminder: &Reminder, owner_role: Role) -> bool {
        self.active
            && self.church_id == reminder.church_id
            && self.source_role == owner_role
            && self
                .reminder_type
                .map(|t| t == reminder.reminder_type)
                .unwrap_or(true)
            && self
                .priority
                .map(|p| p == reminder.priority)
                .unwrap_or(true)
    }

    /// How long a `Reminder` is given to be acknowledged, in millis
    pub fn window_millis(&self) -> i64 {
        self.escalate_after_minutes.saturating_mul(MINUTE)
    }

    pub fn escalate_at(&self, reminder: &Reminder) -> i64 {
        reminder.effective_due_ts().saturating_add(self.window_millis())
    }

    /// Picks the rule that escalates the soonest among the ones that apply
    pub fn find_applicable<'a>(
        rules: &'a [EscalationRule],
        reminder: &Reminder,
        owner_role: Role,
    ) -> Option<&'a EscalationRule> {
        rules
            .iter()
            .filter(|rule| rule.applies_to(reminder, owner_role))
            .min_by_key(|rule| rule.escalate_after_minutes)
    }
}

impl Entity for EscalationRule {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::test::reminder;

    fn rule(church_id: &ID, minutes: i64) -> EscalationRule {
        EscalationRule {
            id: Default::default(),
            church_id: church_id.clone(),
            source_role: Role::Worker,
            escalate_after_minutes: minutes,
            reminder_type: None,
            priority: None,
            active: true,
            created: 0,
        }
    }

    #[test]
    fn status_only_moves_forward() {
        let mut log = EscalationLog::new(&ID::new(), &ID::new(), &ID::new(), None, 0);
        assert_eq!(log.status, EscalationStatus::Pending);
        log.set_status(EscalationStatus::Acknowledged, 10).unwrap();
        assert!(log.resolved_at.is_none());
        assert!(log.set_status(EscalationStatus::Pending, 20).is_err());
        log.set_status(EscalationStatus::Resolved, 30).unwrap();
        assert_eq!(log.resolved_at, Some(30));
        assert!(log.set_status(EscalationStatus::Acknowledged, 40).is_err());
        log.set_status(EscalationStatus::Resolved, 50).unwrap();
        assert_eq!(log.resolved_at, Some(30));
    }

    #[test]
    fn rule_filters_on_role_type_and_priority() {
        let r = reminder(1000);
        let mut matching = rule(&r.church_id, 60);
        assert!(matching.applies_to(&r, Role::Worker));
        assert!(!matching.applies_to(&r, Role::Pastor));

        matching.reminder_type = Some(ReminderType::Appointment);
        assert!(!matching.applies_to(&r, Role::Worker));
        matching.reminder_type = Some(r.reminder_type);
        matching.priority = Some(Priority::Critical);
        assert!(!matching.applies_to(&r, Role::Worker));
        matching.priority = None;
        matching.active = false;
        assert!(!matching.applies_to(&r, Role::Worker));

        assert!(!rule(&ID::new(), 60).applies_to(&r, Role::Worker));
    }

    #[test]
    fn picks_the_soonest_rule() {
        let r = reminder(1000);
        let rules = vec![rule(&r.church_id, 120), rule(&r.church_id, 30)];
        let found = EscalationRule::find_applicable(&rules, &r, Role::Worker).unwrap();
        assert_eq!(found.escalate_after_minutes, 30);
        assert_eq!(found.escalate_at(&r), 1000 + 30 * 60 * 1000);
    }

    #[test]
    fn huge_windows_never_escalate_before_the_due_time() {
        let due = 1_700_000_000_000;
        let r = reminder(due);
        let huge = rule(&r.church_id, i64::MAX / 1000);
        assert_eq!(huge.window_millis(), i64::MAX);
        assert_eq!(huge.escalate_at(&r), i64::MAX);
        assert!(huge.escalate_at(&r) > due);
    }
}
