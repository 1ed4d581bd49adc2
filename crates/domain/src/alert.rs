use crate::{
    reminder::Priority,
    shared::{
        entity::{Entity, ID},
        entity_ref::EntityRef,
    },
};

text_enum! {
    pub enum AlertType {
        OverdueTask => "overdue_task",
        UrgentReminder => "urgent_reminder",
        EscalatedIssue => "escalated_issue",
        UpcomingImportant => "upcoming_important",
        MissedAppointment => "missed_appointment",
    }
}

text_enum! {
    /// Ordered from the least to the most severe
    pub enum AlertSeverity {
        Soft => "soft",
        Urgent => "urgent",
        Critical => "critical",
    }
}

impl AlertSeverity {
    pub fn for_priority(priority: Priority) -> Self {
        match priority {
            Priority::Low | Priority::Medium => Self::Soft,
            Priority::High => Self::Urgent,
            Priority::Critical => Self::Critical,
        }
    }

    pub fn is_urgent(&self) -> bool {
        *self >= Self::Urgent
    }
}

impl Default for AlertSeverity {
    fn default() -> Self {
        Self::Soft
    }
}

text_enum! {
    /// Kinds of records a `DashboardAlert` can point at
    pub enum AlertEntityType {
        Reminder => "reminder",
        Task => "task",
        Booking => "booking",
        Event => "event",
    }
}

/// A high visibility banner on the dashboard of a `User`.
///
/// Lives next to the `Notification` created for the same event and stays
/// visible until dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardAlert {
    pub id: ID,
    pub church_id: ID,
    /// Recipient
    pub user_id: ID,
    pub alert_type: AlertType,
    pub related_entity: Option<EntityRef<AlertEntityType>>,
    pub severity: AlertSeverity,
    pub message: Option<String>,
    pub active: bool,
    pub acknowledged_at: Option<i64>,
    pub dismissed_by: Option<ID>,
    pub dismissed_at: Option<i64>,
    pub created: i64,
}

impl DashboardAlert {
    pub fn dismiss(&mut self, user_id: &ID, now: i64) {
        if self.active {
            self.active = false;
            self.dismissed_by = Some(user_id.clone());
            self.dismissed_at = Some(now);
        }
    }

    /// Acknowledging keeps the alert visible, only dismissing removes it
    pub fn acknowledge(&mut self, now: i64) {
        if self.acknowledged_at.is_none() {
            self.acknowledged_at = Some(now);
        }
    }
}

impl Entity for DashboardAlert {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn severity_follows_priority() {
        assert_eq!(AlertSeverity::for_priority(Priority::Low), AlertSeverity::Soft);
        assert_eq!(AlertSeverity::for_priority(Priority::Medium), AlertSeverity::Soft);
        assert_eq!(AlertSeverity::for_priority(Priority::High), AlertSeverity::Urgent);
        assert_eq!(
            AlertSeverity::for_priority(Priority::Critical),
            AlertSeverity::Critical
        );
        assert!(!AlertSeverity::Soft.is_urgent());
        assert!(AlertSeverity::Urgent.is_urgent());
        assert!(AlertSeverity::Critical.is_urgent());
    }
}
