use super::INotificationRepo;
use crate::repos::shared::inmemory_repo::*;
use steward_domain::{Notification, ID};

pub struct InMemoryNotificationRepo {
    notifications: std::sync::Mutex<Vec<Notification>>,
}

impl InMemoryNotificationRepo {
    pub fn new() -> Self {
        Self {
            notifications: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for InMemoryNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        insert(notification, &self.notifications);
        Ok(())
    }

    async fn save(&self, notification: &Notification) -> anyhow::Result<()> {
        if !save(notification, &self.notifications) {
            anyhow::bail!("Notification {} does not exist", notification.id);
        }
        Ok(())
    }

    async fn find(&self, notification_id: &ID) -> Option<Notification> {
        find(notification_id, &self.notifications)
    }

    async fn find_feed(&self, user_id: &ID, limit: usize) -> anyhow::Result<Vec<Notification>> {
        let mut notifications =
            find_by(&self.notifications, |n| n.user_id == *user_id && !n.dismissed);
        notifications.sort_by_key(|n| std::cmp::Reverse(n.created));
        notifications.truncate(limit);
        Ok(notifications)
    }
}
