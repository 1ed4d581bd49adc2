mod dashboard_alert;
mod escalation_log;
mod escalation_rule;
mod notification;
pub(crate) mod reminder;
mod role_policy;
mod shared;
mod user;

use dashboard_alert::{IDashboardAlertRepo, InMemoryDashboardAlertRepo, PostgresDashboardAlertRepo};
use escalation_log::{IEscalationLogRepo, InMemoryEscalationLogRepo, PostgresEscalationLogRepo};
use escalation_rule::{IEscalationRuleRepo, InMemoryEscalationRuleRepo, PostgresEscalationRuleRepo};
use notification::{INotificationRepo, InMemoryNotificationRepo, PostgresNotificationRepo};
use reminder::{IReminderRepo, InMemoryReminderRepo, PostgresReminderRepo};
use role_policy::{IRolePolicyRepo, InMemoryRolePolicyRepo, PostgresRolePolicyRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use user::{IUserRepo, InMemoryUserRepo, PostgresUserRepo};

pub use shared::repo::UpdateResult;

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
    pub escalation_logs: Arc<dyn IEscalationLogRepo>,
    pub escalation_rules: Arc<dyn IEscalationRuleRepo>,
    pub notifications: Arc<dyn INotificationRepo>,
    pub alerts: Arc<dyn IDashboardAlertRepo>,
    pub role_policies: Arc<dyn IRolePolicyRepo>,
}

impl Repos {
    pub async fn create_postgres(
        connection_string: &str,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            escalation_logs: Arc::new(PostgresEscalationLogRepo::new(pool.clone())),
            escalation_rules: Arc::new(PostgresEscalationRuleRepo::new(pool.clone())),
            notifications: Arc::new(PostgresNotificationRepo::new(pool.clone())),
            alerts: Arc::new(PostgresDashboardAlertRepo::new(pool.clone())),
            role_policies: Arc::new(PostgresRolePolicyRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            reminders: Arc::new(InMemoryReminderRepo::new()),
            escalation_logs: Arc::new(InMemoryEscalationLogRepo::new()),
            escalation_rules: Arc::new(InMemoryEscalationRuleRepo::new()),
            notifications: Arc::new(InMemoryNotificationRepo::new()),
            alerts: Arc::new(InMemoryDashboardAlertRepo::new()),
            role_policies: Arc::new(InMemoryRolePolicyRepo::new()),
        }
    }
}
