use crate::{alert::AlertSeverity, alert::DashboardAlert, notification::Notification};
use std::cmp::Reverse;

/// What the notification bell and the dashboard banner render for a `User`.
///
/// Built from the most recent non dismissed `Notification`s and the most
/// recent active `DashboardAlert`s of the `User`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertFeed {
    /// Newest first
    pub notifications: Vec<Notification>,
    /// Most severe first, then newest first
    pub alerts: Vec<DashboardAlert>,
    pub unread_count: usize,
    pub urgent_count: usize,
    /// Number shown on the bell icon
    pub badge: usize,
    /// Set when there is a critical alert, which makes the bell pulse
    pub pulsing: bool,
}

impl AlertFeed {
    pub fn new(
        mut notifications: Vec<Notification>,
        mut alerts: Vec<DashboardAlert>,
        notifications_limit: usize,
        alerts_limit: usize,
    ) -> Self {
        notifications.retain(|n| !n.dismissed);
        notifications.sort_by_key(|n| Reverse(n.created));
        notifications.truncate(notifications_limit);

        alerts.retain(|a| a.active);
        alerts.sort_by_key(|a| (Reverse(a.severity), Reverse(a.created)));
        alerts.truncate(alerts_limit);

        let unread_count = notifications.iter().filter(|n| !n.read).count();
        let urgent_count = alerts.iter().filter(|a| a.severity.is_urgent()).count();
        let pulsing = alerts.iter().any(|a| a.severity == AlertSeverity::Critical);

        Self {
            notifications,
            alerts,
            unread_count,
            urgent_count,
            badge: unread_count + urgent_count,
            pulsing,
        }
    }
}
