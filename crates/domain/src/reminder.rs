use crate::{
    offset::ReminderOffset,
    shared::{
        entity::{Entity, ID},
        entity_ref::EntityRef,
    },
};
use thiserror::Error;

text_enum! {
    pub enum Priority {
        Low => "low",
        Medium => "medium",
        High => "high",
        Critical => "critical",
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

text_enum! {
    pub enum ReminderType {
        Appointment => "appointment",
        Task => "task",
        Event => "event",
        Custom => "custom",
        SubReminder => "sub_reminder",
    }
}

impl Default for ReminderType {
    fn default() -> Self {
        Self::Custom
    }
}

text_enum! {
    pub enum ReminderStatus {
        Active => "active",
        Completed => "completed",
        Missed => "missed",
        Cancelled => "cancelled",
    }
}

text_enum! {
    pub enum AcknowledgeAction {
        Confirmed => "confirmed",
        Rescheduled => "rescheduled",
        Cancelled => "cancelled",
        Snoozed => "snoozed",
    }
}

text_enum! {
    /// Kinds of records a `Reminder` can be created for
    pub enum ReminderEntityType {
        Booking => "booking",
        Task => "task",
        Event => "event",
        FollowUp => "follow_up",
        Directive => "directive",
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReminderStateError {
    #[error("The reminder is {0} and can no longer be changed")]
    Closed(ReminderStatus),
    #[error("The reminder has already been acknowledged")]
    Acknowledged,
    #[error("The reminder has been snoozed the maximum of {0} times")]
    SnoozeLimitReached(i64),
    #[error("Snooze duration must be positive, got {0}")]
    InvalidSnoozeDuration(i64),
    #[error("Snoozing a reminder requires a snooze duration")]
    MissingSnoozeDuration,
    #[error("The reminder is already escalated to another user")]
    AlreadyEscalated,
}

/// A `Reminder` is a scheduled obligation owned by exactly one `User`.
///
/// The `status` is never set directly, it only moves through the
/// transitions below and every terminal status is absorbing:
///
/// ```text
/// active -> completed   acknowledged with `confirmed`
/// active -> cancelled   acknowledged with `cancelled`
/// active -> missed      overdue sweep found it unacknowledged
/// active -> active      snoozed, rescheduled or escalated
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    pub church_id: ID,
    /// Owner of the `Reminder`
    pub user_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    /// Never changes after creation, snoozing moves `snoozed_until` instead
    pub due_ts: i64,
    pub reminder_type: ReminderType,
    pub related_entity: Option<EntityRef<ReminderEntityType>>,
    pub parent_reminder_id: Option<ID>,
    pub acknowledged: bool,
    pub acknowledged_at: Option<i64>,
    pub acknowledged_action: Option<AcknowledgeAction>,
    pub snoozed_until: Option<i64>,
    pub snooze_count: i64,
    pub escalated: bool,
    pub escalated_at: Option<i64>,
    pub escalated_to: Option<ID>,
    pub status: ReminderStatus,
    pub created_by: ID,
    pub created: i64,
    pub updated: i64,
    /// Incremented on every stored update and used to detect
    /// concurrent modifications of the same `Reminder`
    pub version: i64,
}

impl Reminder {
    pub fn is_closed(&self) -> bool {
        self.status != ReminderStatus::Active
    }

    /// The instant the owner is currently expected to act by
    pub fn effective_due_ts(&self) -> i64 {
        match self.snoozed_until {
            Some(snoozed_until) if snoozed_until > self.due_ts => snoozed_until,
            _ => self.due_ts,
        }
    }

    pub fn is_overdue(&self, now: i64) -> bool {
        !self.is_closed() && !self.acknowledged && self.effective_due_ts() <= now
    }

    /// The owner and the user it was escalated to are the only ones
    /// allowed to see and act on a `Reminder`
    pub fn is_visible_to(&self, user_id: &ID) -> bool {
        self.user_id == *user_id || self.escalated_to.as_ref() == Some(user_id)
    }

    fn ensure_open(&self) -> Result<(), ReminderStateError> {
        if self.is_closed() {
            return Err(ReminderStateError::Closed(self.status));
        }
        Ok(())
    }

    /// Acknowledges the `Reminder` with any action except `Snoozed`,
    /// which goes through `snooze` instead.
    pub fn acknowledge(
        &mut self,
        action: AcknowledgeAction,
        now: i64,
    ) -> Result<(), ReminderStateError> {
        self.ensure_open()?;

        match action {
            AcknowledgeAction::Snoozed => return Err(ReminderStateError::MissingSnoozeDuration),
            AcknowledgeAction::Confirmed => self.status = ReminderStatus::Completed,
            AcknowledgeAction::Cancelled => self.status = ReminderStatus::Cancelled,
            // Stays active, a replacement `Reminder` is created separately
            AcknowledgeAction::Rescheduled => {}
        }
        self.acknowledged = true;
        self.acknowledged_at = Some(now);
        self.acknowledged_action = Some(action);
        self.updated = now;

        Ok(())
    }

    /// Defers the `Reminder` by `duration` millis and returns the
    /// `ReminderSchedule` that should trigger when the snooze is over.
    pub fn snooze(
        &mut self,
        duration: i64,
        snooze_limit: i64,
        now: i64,
    ) -> Result<ReminderSchedule, ReminderStateError> {
        self.ensure_open()?;
        let snoozed_until = match now.checked_add(duration) {
            Some(snoozed_until) if duration > 0 => snoozed_until,
            _ => return Err(ReminderStateError::InvalidSnoozeDuration(duration)),
        };
        if self.snooze_count >= snooze_limit {
            return Err(ReminderStateError::SnoozeLimitReached(snooze_limit));
        }

        self.acknowledged = false;
        self.acknowledged_action = Some(AcknowledgeAction::Snoozed);
        self.snoozed_until = Some(snoozed_until);
        self.snooze_count += 1;
        self.updated = now;

        Ok(ReminderSchedule::new(&self.id, snoozed_until, None, now))
    }

    pub fn mark_missed(&mut self, now: i64) -> Result<(), ReminderStateError> {
        self.ensure_open()?;
        if self.acknowledged {
            return Err(ReminderStateError::Acknowledged);
        }
        self.status = ReminderStatus::Missed;
        self.updated = now;
        Ok(())
    }

    /// Hands the `Reminder` over to `to_user_id`.
    ///
    /// Escalating again to the same user is allowed and keeps the
    /// original escalation timestamp.
    pub fn escalate(&mut self, to_user_id: &ID, now: i64) -> Result<(), ReminderStateError> {
        self.ensure_open()?;
        match &self.escalated_to {
            Some(current) if current == to_user_id => return Ok(()),
            Some(_) => return Err(ReminderStateError::AlreadyEscalated),
            None => {}
        }
        self.escalated = true;
        self.escalated_at = Some(now);
        self.escalated_to = Some(to_user_id.clone());
        self.updated = now;
        Ok(())
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// One planned trigger instant of a `Reminder`
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderSchedule {
    pub id: ID,
    pub reminder_id: ID,
    pub trigger_ts: i64,
    /// The lead time this trigger was computed from, `None` when the
    /// trigger was created by snoozing the `Reminder`
    pub offset: Option<ReminderOffset>,
    pub triggered: bool,
    pub triggered_at: Option<i64>,
    /// Set when the `Reminder` was snoozed or acknowledged before this
    /// trigger fired. Superseded schedules never fire.
    pub superseded: bool,
    pub created: i64,
}

impl ReminderSchedule {
    pub fn new(
        reminder_id: &ID,
        trigger_ts: i64,
        offset: Option<ReminderOffset>,
        now: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            reminder_id: reminder_id.clone(),
            trigger_ts,
            offset,
            triggered: false,
            triggered_at: None,
            superseded: false,
            created: now,
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.triggered && !self.superseded
    }
}

impl Entity for ReminderSchedule {
    fn id(&self) -> &ID {
        &self.id
    }
}
