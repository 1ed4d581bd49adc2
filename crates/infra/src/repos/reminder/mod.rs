mod inmemory;
mod postgres;

use crate::repos::shared::repo::UpdateResult;
pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;
use steward_domain::{Reminder, ReminderSchedule, ReminderStatus, ID};

/// Storage of `Reminder`s together with their `ReminderSchedule`s.
///
/// Updates are optimistic: a `Reminder` is only written if the stored
/// `version` equals the `version` of the given `Reminder`, and the stored
/// `version` is then incremented.
#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    /// Stores the `Reminder` and all its `ReminderSchedule`s, or nothing at all
    async fn insert(&self, reminder: &Reminder, schedules: &[ReminderSchedule])
        -> anyhow::Result<()>;
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<UpdateResult>;
    /// Saves the `Reminder`, supersedes its pending `ReminderSchedule`s and
    /// stores the `replacement` schedule if given, or does nothing at all
    async fn save_and_reschedule(
        &self,
        reminder: &Reminder,
        replacement: Option<&ReminderSchedule>,
    ) -> anyhow::Result<UpdateResult>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    /// `Reminder`s in the church the `User` owns, created or was escalated to,
    /// ordered by due time
    async fn find_by_user(
        &self,
        church_id: &ID,
        user_id: &ID,
        status: Option<ReminderStatus>,
    ) -> anyhow::Result<Vec<Reminder>>;
    /// Active and unacknowledged `Reminder`s whose effective due time is `<= now`,
    /// ordered by due time and id. Only `Reminder`s ordered after `after` are
    /// returned, which pages through the listing.
    async fn find_overdue(
        &self,
        now: i64,
        after: Option<&Reminder>,
        limit: usize,
    ) -> anyhow::Result<Vec<Reminder>>;
    async fn find_schedules(&self, reminder_id: &ID) -> anyhow::Result<Vec<ReminderSchedule>>;
    /// Marks every pending `ReminderSchedule` with a trigger time `<= before`
    /// as triggered and returns them. A schedule is only ever claimed once.
    async fn claim_due_schedules(
        &self,
        before: i64,
        now: i64,
    ) -> anyhow::Result<Vec<ReminderSchedule>>;
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::{create_test_contexts, repos::shared::repo::UpdateResult};
    use steward_domain::{
        AcknowledgeAction, Priority, Reminder, ReminderSchedule, ReminderStatus, ReminderType,
        Role, User, ID,
    };

    pub fn reminder(owner: &User, due_ts: i64) -> Reminder {
        Reminder {
            id: Default::default(),
            church_id: owner.church_id.clone(),
            user_id: owner.id.clone(),
            title: "Prepare the sermon".into(),
            description: Some("Sunday service".into()),
            priority: Priority::High,
            due_ts,
            reminder_type: ReminderType::Task,
            related_entity: None,
            parent_reminder_id: None,
            acknowledged: false,
            acknowledged_at: None,
            acknowledged_action: None,
            snoozed_until: None,
            snooze_count: 0,
            escalated: false,
            escalated_at: None,
            escalated_to: None,
            status: ReminderStatus::Active,
            created_by: owner.id.clone(),
            created: 0,
            updated: 0,
            version: 0,
        }
    }

    #[tokio::test]
    async fn insert_and_find_with_schedules() {
        for ctx in create_test_contexts().await {
            let owner = User::new(ID::new(), Role::Pastor, 0);
            ctx.repos.users.insert(&owner).await.unwrap();

            let r = reminder(&owner, 10_000);
            let schedules = vec![
                ReminderSchedule::new(&r.id, 5_000, Some("1h".parse().unwrap()), 0),
                ReminderSchedule::new(&r.id, 9_000, None, 0),
            ];
            ctx.repos.reminders.insert(&r, &schedules).await.unwrap();

            assert_eq!(ctx.repos.reminders.find(&r.id).await, Some(r.clone()));
            let mut stored = ctx.repos.reminders.find_schedules(&r.id).await.unwrap();
            stored.sort_by_key(|s| s.trigger_ts);
            assert_eq!(stored, schedules);

            let owned = ctx
                .repos
                .reminders
                .find_by_user(&owner.church_id, &owner.id, None)
                .await
                .unwrap();
            assert_eq!(owned.len(), 1);
            assert!(ctx
                .repos
                .reminders
                .find_by_user(&owner.church_id, &owner.id, Some(ReminderStatus::Missed))
                .await
                .unwrap()
                .is_empty());
        }
    }

    #[tokio::test]
    async fn save_detects_concurrent_updates() {
        for ctx in create_test_contexts().await {
            let owner = User::new(ID::new(), Role::Worker, 0);
            ctx.repos.users.insert(&owner).await.unwrap();
            let r = reminder(&owner, 10_000);
            ctx.repos.reminders.insert(&r, &[]).await.unwrap();

            let mut first = r.clone();
            first.acknowledge(AcknowledgeAction::Confirmed, 100).unwrap();
            let mut second = r.clone();
            second.acknowledge(AcknowledgeAction::Cancelled, 100).unwrap();

            assert_eq!(
                ctx.repos.reminders.save(&first).await.unwrap(),
                UpdateResult::Updated
            );
            assert_eq!(
                ctx.repos.reminders.save(&second).await.unwrap(),
                UpdateResult::VersionConflict
            );

            let stored = ctx.repos.reminders.find(&r.id).await.unwrap();
            assert_eq!(stored.status, ReminderStatus::Completed);
            assert_eq!(stored.version, 1);
        }
    }

    #[tokio::test]
    async fn reschedule_supersedes_pending_schedules() {
        for ctx in create_test_contexts().await {
            let owner = User::new(ID::new(), Role::Worker, 0);
            ctx.repos.users.insert(&owner).await.unwrap();
            let mut r = reminder(&owner, 10_000);
            let schedule = ReminderSchedule::new(&r.id, 5_000, None, 0);
            ctx.repos.reminders.insert(&r, &[schedule.clone()]).await.unwrap();

            let replacement = r.snooze(2_000, 3, 4_000).unwrap();
            assert_eq!(
                ctx.repos
                    .reminders
                    .save_and_reschedule(&r, Some(&replacement))
                    .await
                    .unwrap(),
                UpdateResult::Updated
            );

            let schedules = ctx.repos.reminders.find_schedules(&r.id).await.unwrap();
            assert_eq!(schedules.len(), 2);
            for s in schedules {
                if s.id == schedule.id {
                    assert!(s.superseded);
                } else {
                    assert_eq!(s.trigger_ts, 6_000);
                    assert!(s.is_pending());
                }
            }

            // Only the replacement is due, the superseded one never fires
            let claimed = ctx.repos.reminders.claim_due_schedules(7_000, 7_000).await.unwrap();
            assert_eq!(claimed.len(), 1);
            assert_eq!(claimed[0].id, replacement.id);
            assert!(claimed[0].triggered);
            assert_eq!(claimed[0].triggered_at, Some(7_000));
            assert!(ctx
                .repos
                .reminders
                .claim_due_schedules(7_000, 7_000)
                .await
                .unwrap()
                .is_empty());
        }
    }

    #[tokio::test]
    async fn finds_overdue_reminders() {
        for ctx in create_test_contexts().await {
            let owner = User::new(ID::new(), Role::Member, 0);
            ctx.repos.users.insert(&owner).await.unwrap();

            let overdue = reminder(&owner, 1_000);
            let upcoming = reminder(&owner, 50_000);
            let mut snoozed = reminder(&owner, 1_000);
            snoozed.snoozed_until = Some(40_000);
            let mut rescheduled = reminder(&owner, 1_000);
            rescheduled
                .acknowledge(AcknowledgeAction::Rescheduled, 500)
                .unwrap();
            for r in &[&overdue, &upcoming, &snoozed, &rescheduled] {
                ctx.repos.reminders.insert(r, &[]).await.unwrap();
            }

            let found = ctx
                .repos
                .reminders
                .find_overdue(10_000, None, 100)
                .await
                .unwrap();
            let ids = found.iter().map(|r| r.id.clone()).collect::<Vec<_>>();
            assert!(ids.contains(&overdue.id));
            assert!(!ids.contains(&upcoming.id));
            assert!(!ids.contains(&snoozed.id));
            assert!(!ids.contains(&rescheduled.id));
        }
    }

    #[tokio::test]
    async fn pages_through_overdue_reminders() {
        for ctx in create_test_contexts().await {
            let owner = User::new(ID::new(), Role::Member, 0);
            ctx.repos.users.insert(&owner).await.unwrap();
            let mut inserted = Vec::new();
            for due_ts in &[3_000, 1_000, 2_000, 2_000, 4_000] {
                let r = reminder(&owner, *due_ts);
                ctx.repos.reminders.insert(&r, &[]).await.unwrap();
                inserted.push(r.id);
            }

            let mut seen = Vec::new();
            let mut after: Option<Reminder> = None;
            loop {
                let page = ctx
                    .repos
                    .reminders
                    .find_overdue(10_000, after.as_ref(), 2)
                    .await
                    .unwrap();
                if page.is_empty() {
                    break;
                }
                assert!(page.len() <= 2);
                after = page.last().cloned();
                seen.extend(page);
            }

            assert_eq!(seen.len(), 5);
            let due_times = seen.iter().map(|r| r.due_ts).collect::<Vec<_>>();
            assert_eq!(due_times, vec![1_000, 2_000, 2_000, 3_000, 4_000]);
            for id in &inserted {
                assert_eq!(seen.iter().filter(|r| r.id == *id).count(), 1);
            }
        }
    }
}
