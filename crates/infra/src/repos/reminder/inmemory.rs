use super::IReminderRepo;
use crate::repos::shared::{inmemory_repo::*, repo::UpdateResult};
use std::sync::Mutex;
use steward_domain::{Reminder, ReminderSchedule, ReminderStatus, ID};

pub struct InMemoryReminderRepo {
    reminders: Mutex<Vec<Reminder>>,
    schedules: Mutex<Vec<ReminderSchedule>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: Mutex::new(Vec::new()),
            schedules: Mutex::new(Vec::new()),
        }
    }

    fn compare_and_swap(
        &self,
        reminder: &Reminder,
        reschedule: Option<Option<&ReminderSchedule>>,
    ) -> UpdateResult {
        // Lock order: reminders, then schedules
        let mut reminders = self.reminders.lock().unwrap();
        let stored = match reminders.iter_mut().find(|r| r.id == reminder.id) {
            Some(stored) if stored.version == reminder.version => stored,
            _ => return UpdateResult::VersionConflict,
        };

        if let Some(replacement) = reschedule {
            let mut schedules = self.schedules.lock().unwrap();
            for schedule in schedules.iter_mut() {
                if schedule.reminder_id == reminder.id && schedule.is_pending() {
                    schedule.superseded = true;
                }
            }
            if let Some(replacement) = replacement {
                schedules.push(replacement.clone());
            }
        }

        *stored = reminder.clone();
        stored.version = reminder.version + 1;
        UpdateResult::Updated
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(
        &self,
        reminder: &Reminder,
        schedules: &[ReminderSchedule],
    ) -> anyhow::Result<()> {
        let mut reminders = self.reminders.lock().unwrap();
        let mut stored_schedules = self.schedules.lock().unwrap();
        reminders.push(reminder.clone());
        stored_schedules.extend_from_slice(schedules);
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<UpdateResult> {
        Ok(self.compare_and_swap(reminder, None))
    }

    async fn save_and_reschedule(
        &self,
        reminder: &Reminder,
        replacement: Option<&ReminderSchedule>,
    ) -> anyhow::Result<UpdateResult> {
        Ok(self.compare_and_swap(reminder, Some(replacement)))
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        find(reminder_id, &self.reminders)
    }

    async fn find_by_user(
        &self,
        church_id: &ID,
        user_id: &ID,
        status: Option<ReminderStatus>,
    ) -> anyhow::Result<Vec<Reminder>> {
        let mut reminders = find_by(&self.reminders, |r| {
            r.church_id == *church_id
                && (r.is_visible_to(user_id) || r.created_by == *user_id)
                && status.map(|s| s == r.status).unwrap_or(true)
        });
        reminders.sort_by_key(|r| r.due_ts);
        Ok(reminders)
    }

    async fn find_overdue(
        &self,
        now: i64,
        after: Option<&Reminder>,
        limit: usize,
    ) -> anyhow::Result<Vec<Reminder>> {
        let position = |r: &Reminder| (r.due_ts, *r.id.inner_ref());
        let mut reminders = find_by(&self.reminders, |r| {
            r.is_overdue(now) && after.map(|a| position(r) > position(a)).unwrap_or(true)
        });
        reminders.sort_by_key(position);
        reminders.truncate(limit);
        Ok(reminders)
    }

    async fn find_schedules(&self, reminder_id: &ID) -> anyhow::Result<Vec<ReminderSchedule>> {
        let mut schedules = find_by(&self.schedules, |s| s.reminder_id == *reminder_id);
        schedules.sort_by_key(|s| s.trigger_ts);
        Ok(schedules)
    }

    async fn claim_due_schedules(
        &self,
        before: i64,
        now: i64,
    ) -> anyhow::Result<Vec<ReminderSchedule>> {
        Ok(update_many(
            &self.schedules,
            |s| s.is_pending() && s.trigger_ts <= before,
            |s| {
                s.triggered = true;
                s.triggered_at = Some(now);
            },
        ))
    }
}
