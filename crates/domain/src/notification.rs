use crate::{
    reminder::Priority,
    shared::entity::{Entity, ID},
};

text_enum! {
    pub enum NotificationType {
        Reminder => "reminder",
        Escalation => "escalation",
        System => "system",
        Alert => "alert",
        Info => "info",
    }
}

impl Default for NotificationType {
    fn default() -> Self {
        Self::Info
    }
}

text_enum! {
    /// Only `Dashboard` is delivered, the others are kept for
    /// records created by external senders.
    pub enum NotificationChannel {
        Dashboard => "dashboard",
        Email => "email",
        Sms => "sms",
        Push => "push",
    }
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::Dashboard
    }
}

/// A message shown in the notification bell of a `User`
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: ID,
    pub church_id: ID,
    /// Recipient
    pub user_id: ID,
    pub reminder_id: Option<ID>,
    pub title: String,
    pub message: Option<String>,
    pub notification_type: NotificationType,
    pub priority: Priority,
    pub channel: NotificationChannel,
    pub read: bool,
    pub read_at: Option<i64>,
    /// Dismissed notifications are kept for audit but left out of the feed
    pub dismissed: bool,
    pub dismissed_at: Option<i64>,
    pub requires_action: bool,
    pub action_url: Option<String>,
    pub created: i64,
}

impl Notification {
    pub fn mark_read(&mut self, now: i64) {
        if !self.read {
            self.read = true;
            self.read_at = Some(now);
        }
    }

    pub fn dismiss(&mut self, now: i64) {
        if !self.dismissed {
            self.dismissed = true;
            self.dismissed_at = Some(now);
        }
    }
}

impl Entity for Notification {
    fn id(&self) -> &ID {
        &self.id
    }
}
