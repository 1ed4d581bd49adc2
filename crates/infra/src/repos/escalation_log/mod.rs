mod inmemory;
mod postgres;

pub use inmemory::InMemoryEscalationLogRepo;
pub use postgres::PostgresEscalationLogRepo;
use steward_domain::{EscalationLog, ID};

#[async_trait::async_trait]
pub trait IEscalationLogRepo: Send + Sync {
    /// Stores the log unless the `Reminder` was already escalated to the same
    /// `User`. Returns whether the log was stored.
    async fn insert_if_absent(&self, log: &EscalationLog) -> anyhow::Result<bool>;
    async fn save(&self, log: &EscalationLog) -> anyhow::Result<()>;
    async fn delete(&self, log_id: &ID) -> anyhow::Result<()>;
    async fn find(&self, log_id: &ID) -> Option<EscalationLog>;
    async fn find_by_reminder(&self, reminder_id: &ID) -> anyhow::Result<Vec<EscalationLog>>;
    /// Logs escalated to the `User`, newest first
    async fn find_by_target(&self, user_id: &ID) -> anyhow::Result<Vec<EscalationLog>>;
}

#[cfg(test)]
mod tests {
    use crate::create_test_contexts;
    use crate::repos::reminder::tests::reminder;
    use steward_domain::{EscalationLog, EscalationStatus, Reminder, Role, User, ID};

    async fn setup(ctx: &crate::StewardContext) -> (User, User, Reminder) {
        let church_id = ID::new();
        let worker = User::new(church_id.clone(), Role::Worker, 0);
        let admin = User::new(church_id, Role::Admin, 0);
        ctx.repos.users.insert(&worker).await.unwrap();
        ctx.repos.users.insert(&admin).await.unwrap();
        let reminder = reminder(&worker, 1000);
        ctx.repos.reminders.insert(&reminder, &[]).await.unwrap();
        (worker, admin, reminder)
    }

    #[tokio::test]
    async fn inserts_once_per_reminder_and_target() {
        for ctx in create_test_contexts().await {
            let (worker, admin, reminder) = setup(&ctx).await;

            let log = EscalationLog::new(&reminder.id, &worker.id, &admin.id, None, 10);
            assert!(ctx.repos.escalation_logs.insert_if_absent(&log).await.unwrap());
            let retry = EscalationLog::new(&reminder.id, &worker.id, &admin.id, None, 20);
            assert!(!ctx
                .repos
                .escalation_logs
                .insert_if_absent(&retry)
                .await
                .unwrap());

            let logs = ctx
                .repos
                .escalation_logs
                .find_by_reminder(&reminder.id)
                .await
                .unwrap();
            assert_eq!(logs, vec![log.clone()]);
            assert_eq!(
                ctx.repos.escalation_logs.find_by_target(&admin.id).await.unwrap(),
                vec![log]
            );
            assert!(ctx
                .repos
                .escalation_logs
                .find_by_target(&worker.id)
                .await
                .unwrap()
                .is_empty());
        }
    }

    #[tokio::test]
    async fn saves_status_changes() {
        for ctx in create_test_contexts().await {
            let (worker, admin, reminder) = setup(&ctx).await;

            let mut log = EscalationLog::new(&reminder.id, &worker.id, &admin.id, None, 10);
            ctx.repos.escalation_logs.insert_if_absent(&log).await.unwrap();
            log.set_status(EscalationStatus::Resolved, 50).unwrap();
            ctx.repos.escalation_logs.save(&log).await.unwrap();

            let stored = ctx.repos.escalation_logs.find(&log.id).await.unwrap();
            assert_eq!(stored.status, EscalationStatus::Resolved);
            assert_eq!(stored.resolved_at, Some(50));
        }
    }

    #[tokio::test]
    async fn deletes_logs() {
        for ctx in create_test_contexts().await {
            let (worker, admin, reminder) = setup(&ctx).await;

            let log = EscalationLog::new(&reminder.id, &worker.id, &admin.id, None, 10);
            ctx.repos.escalation_logs.insert_if_absent(&log).await.unwrap();
            ctx.repos.escalation_logs.delete(&log.id).await.unwrap();

            assert!(ctx.repos.escalation_logs.find(&log.id).await.is_none());
            // The pair can be escalated again once the log is gone
            assert!(ctx.repos.escalation_logs.insert_if_absent(&log).await.unwrap());
        }
    }
}
