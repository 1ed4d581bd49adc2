use crate::alert::raise_alert::RaiseAlertUseCase;
use crate::notification::create_notification::CreateNotificationUseCase;
use crate::shared::usecase::{execute, UseCase};
use steward_domain::{AlertType, NotificationType, Priority, Reminder};
use steward_infra::StewardContext;
use tracing::{error, warn};

/// Claims every `ReminderSchedule` that is due and notifies the owners
/// of the `Reminder`s they belong to.
///
/// Claiming is atomic, so a schedule is only ever fired once even with
/// several instances running this use case at the same time.
#[derive(Debug)]
pub struct FireDueRemindersUseCase;

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

/// Notifies the owner that the `Reminder` needs attention
async fn fire(reminder: &Reminder, ctx: &StewardContext) {
    let message = reminder.description.clone();
    let notification = CreateNotificationUseCase::reminder_action(
        &reminder.church_id,
        &reminder.user_id,
        &reminder.id,
        NotificationType::Reminder,
        reminder.priority,
        reminder.title.clone(),
        message,
    );
    if execute(notification, ctx).await.is_err() {
        return;
    }

    let alert_type = match reminder.priority {
        Priority::Critical => AlertType::UrgentReminder,
        Priority::High => AlertType::UpcomingImportant,
        Priority::Low | Priority::Medium => return,
    };
    let alert = RaiseAlertUseCase::for_reminder(
        reminder,
        &reminder.user_id,
        alert_type,
        format!("\"{}\" is coming up", reminder.title),
    );
    let _ = execute(alert, ctx).await;
}

#[async_trait::async_trait(?Send)]
impl UseCase for FireDueRemindersUseCase {
    /// Number of `Reminder`s fired
    type Response = usize;
    type Error = UseCaseError;

    const NAME: &'static str = "FireDueReminders";

    async fn execute(&mut self, ctx: &StewardContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let schedules = ctx
            .repos
            .reminders
            .claim_due_schedules(now, now)
            .await
            .map_err(|e| {
                error!("Unable to claim due reminder schedules. Err: {:?}", e);
                UseCaseError::StorageError
            })?;

        let mut fired = 0;
        for schedule in schedules {
            let reminder = match ctx.repos.reminders.find(&schedule.reminder_id).await {
                Some(reminder) => reminder,
                None => {
                    warn!(
                        "Reminder {} of schedule {} was not found",
                        schedule.reminder_id, schedule.id
                    );
                    continue;
                }
            };
            // Acknowledged in the meantime
            if reminder.is_closed() || reminder.acknowledged {
                continue;
            }
            fire(&reminder, ctx).await;
            fired += 1;
        }

        Ok(fired)
    }
}
