use crate::dtos::NotificationDTO;
use serde::{Deserialize, Serialize};
use steward_domain::{Notification, NotificationChannel, NotificationType, Priority, ID};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub notification: NotificationDTO,
}

impl NotificationResponse {
    pub fn new(notification: Notification) -> Self {
        Self {
            notification: NotificationDTO::new(notification),
        }
    }
}

#[derive(Deserialize, Serialize)]
pub struct NotificationPathParams {
    pub notification_id: ID,
}

pub mod create_notification {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub user_id: ID,
        #[serde(default)]
        pub reminder_id: Option<ID>,
        pub title: String,
        #[serde(default)]
        pub message: Option<String>,
        #[serde(default, rename = "type")]
        pub notification_type: Option<NotificationType>,
        #[serde(default)]
        pub priority: Option<Priority>,
        #[serde(default)]
        pub channel: Option<NotificationChannel>,
        #[serde(default)]
        pub requires_action: Option<bool>,
        #[serde(default)]
        pub action_url: Option<String>,
    }

    pub type APIResponse = NotificationResponse;
}

pub mod mark_notification_read {
    use super::*;

    pub type PathParams = NotificationPathParams;
    pub type APIResponse = NotificationResponse;
}

pub mod dismiss_notification {
    use super::*;

    pub type PathParams = NotificationPathParams;
    pub type APIResponse = NotificationResponse;
}
