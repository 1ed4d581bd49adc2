use super::IDashboardAlertRepo;
use crate::repos::shared::inmemory_repo::*;
use std::cmp::Reverse;
use steward_domain::{DashboardAlert, ID};

pub struct InMemoryDashboardAlertRepo {
    alerts: std::sync::Mutex<Vec<DashboardAlert>>,
}

impl InMemoryDashboardAlertRepo {
    pub fn new() -> Self {
        Self {
            alerts: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IDashboardAlertRepo for InMemoryDashboardAlertRepo {
    async fn insert(&self, alert: &DashboardAlert) -> anyhow::Result<()> {
        insert(alert, &self.alerts);
        Ok(())
    }

    async fn save(&self, alert: &DashboardAlert) -> anyhow::Result<()> {
        if !save(alert, &self.alerts) {
            anyhow::bail!("Alert {} does not exist", alert.id);
        }
        Ok(())
    }

    async fn find(&self, alert_id: &ID) -> Option<DashboardAlert> {
        find(alert_id, &self.alerts)
    }

    async fn find_active(&self, user_id: &ID, limit: usize) -> anyhow::Result<Vec<DashboardAlert>> {
        let mut alerts = find_by(&self.alerts, |a| a.user_id == *user_id && a.active);
        alerts.sort_by_key(|a| (Reverse(a.severity), Reverse(a.created)));
        alerts.truncate(limit);
        Ok(alerts)
    }
}
