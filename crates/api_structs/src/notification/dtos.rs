use serde::{Deserialize, Serialize};
use steward_domain::{Notification, NotificationChannel, NotificationType, Priority, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDTO {
    pub id: ID,
    pub church_id: ID,
    pub user_id: ID,
    pub reminder_id: Option<ID>,
    pub title: String,
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub priority: Priority,
    pub channel: NotificationChannel,
    pub read: bool,
    pub read_at: Option<i64>,
    pub dismissed: bool,
    pub dismissed_at: Option<i64>,
    pub requires_action: bool,
    pub action_url: Option<String>,
    pub created: i64,
}

impl NotificationDTO {
    pub fn new(notification: Notification) -> Self {
        Self {
            id: notification.id,
            church_id: notification.church_id,
            user_id: notification.user_id,
            reminder_id: notification.reminder_id,
            title: notification.title,
            message: notification.message,
            notification_type: notification.notification_type,
            priority: notification.priority,
            channel: notification.channel,
            read: notification.read,
            read_at: notification.read_at,
            dismissed: notification.dismissed,
            dismissed_at: notification.dismissed_at,
            requires_action: notification.requires_action,
            action_url: notification.action_url,
            created: notification.created,
        }
    }
}
