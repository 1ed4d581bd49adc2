use crate::dtos::NotificationDTO;
use serde::{Deserialize, Serialize};
use steward_domain::{
    AlertEntityType, AlertFeed, AlertSeverity, AlertType, DashboardAlert, EntityRef, ID,
};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DashboardAlertDTO {
    pub id: ID,
    pub church_id: ID,
    pub user_id: ID,
    #[serde(rename = "type")]
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

impl DashboardAlertDTO {
    pub fn new(alert: DashboardAlert) -> Self {
        Self {
            id: alert.id,
            church_id: alert.church_id,
            user_id: alert.user_id,
            alert_type: alert.alert_type,
            related_entity: alert.related_entity,
            severity: alert.severity,
            message: alert.message,
            active: alert.active,
            acknowledged_at: alert.acknowledged_at,
            dismissed_by: alert.dismissed_by,
            dismissed_at: alert.dismissed_at,
            created: alert.created,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AlertFeedDTO {
    pub notifications: Vec<NotificationDTO>,
    pub alerts: Vec<DashboardAlertDTO>,
    pub unread_count: usize,
    pub urgent_count: usize,
    pub badge: usize,
    pub pulsing: bool,
    /// How long clients should wait before polling the feed again
    pub poll_interval_secs: u64,
}

impl AlertFeedDTO {
    pub fn new(feed: AlertFeed, poll_interval_secs: u64) -> Self {
        Self {
            notifications: feed
                .notifications
                .into_iter()
                .map(NotificationDTO::new)
                .collect(),
            alerts: feed.alerts.into_iter().map(DashboardAlertDTO::new).collect(),
            unread_count: feed.unread_count,
            urgent_count: feed.urgent_count,
            badge: feed.badge,
            pulsing: feed.pulsing,
            poll_interval_secs,
        }
    }
}
