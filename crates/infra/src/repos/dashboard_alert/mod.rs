mod inmemory;
mod postgres;

pub use inmemory::InMemoryDashboardAlertRepo;
pub use postgres::PostgresDashboardAlertRepo;
use steward_domain::{DashboardAlert, ID};

#[async_trait::async_trait]
pub trait IDashboardAlertRepo: Send + Sync {
    async fn insert(&self, alert: &DashboardAlert) -> anyhow::Result<()>;
    async fn save(&self, alert: &DashboardAlert) -> anyhow::Result<()>;
    async fn find(&self, alert_id: &ID) -> Option<DashboardAlert>;
    /// Active `DashboardAlert`s of the `User`, most severe first and newest
    /// first within the same severity
    async fn find_active(&self, user_id: &ID, limit: usize) -> anyhow::Result<Vec<DashboardAlert>>;
}
