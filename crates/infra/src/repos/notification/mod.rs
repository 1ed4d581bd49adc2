mod inmemory;
mod postgres;

pub use inmemory::InMemoryNotificationRepo;
pub use postgres::PostgresNotificationRepo;
use steward_domain::{Notification, ID};

#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()>;
    async fn save(&self, notification: &Notification) -> anyhow::Result<()>;
    async fn find(&self, notification_id: &ID) -> Option<Notification>;
    /// Undismissed `Notification`s of the `User`, newest first
    async fn find_feed(&self, user_id: &ID, limit: usize) -> anyhow::Result<Vec<Notification>>;
}
