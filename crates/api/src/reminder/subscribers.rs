use super::{
    acknowledge_reminder::AcknowledgeReminderUseCase,
    escalate_reminder::{EscalateReminderUseCase, UseCaseResponse},
};
use crate::alert::raise_alert::RaiseAlertUseCase;
use crate::notification::create_notification::CreateNotificationUseCase;
use crate::shared::usecase::{execute, Subscriber};
use steward_domain::{AlertType, EscalationStatus, NotificationType, Reminder, ReminderStatus};
use steward_infra::StewardContext;
use tracing::error;

pub struct NotifyTargetOnReminderEscalated;

#[async_trait::async_trait(?Send)]
impl Subscriber<EscalateReminderUseCase> for NotifyTargetOnReminderEscalated {
    async fn notify(&self, e: &UseCaseResponse, ctx: &StewardContext) {
        if !e.escalated_now {
            return;
        }
        let reminder = &e.reminder;
        let target = &e.escalation.escalated_to;

        let notification = CreateNotificationUseCase::reminder_action(
            &reminder.church_id,
            target,
            &reminder.id,
            NotificationType::Escalation,
            reminder.priority,
            format!("Escalated: {}", reminder.title),
            e.escalation.reason.clone(),
        );
        // Sideeffect, ignore result
        let _ = execute(notification, ctx).await;

        let alert = RaiseAlertUseCase::for_reminder(
            reminder,
            target,
            AlertType::EscalatedIssue,
            format!("\"{}\" was escalated to you", reminder.title),
        );
        let _ = execute(alert, ctx).await;
    }
}

pub struct ResolveEscalationsOnReminderClosed;

#[async_trait::async_trait(?Send)]
impl Subscriber<AcknowledgeReminderUseCase> for ResolveEscalationsOnReminderClosed {
    async fn notify(&self, e: &Reminder, ctx: &StewardContext) {
        if e.status != ReminderStatus::Completed && e.status != ReminderStatus::Cancelled {
            return;
        }

        let logs = match ctx.repos.escalation_logs.find_by_reminder(&e.id).await {
            Ok(logs) => logs,
            Err(err) => {
                error!(
                    "Unable to find escalations of reminder {}. Err: {:?}",
                    e.id, err
                );
                return;
            }
        };
        let now = ctx.sys.get_timestamp_millis();
        for mut log in logs {
            if log.status == EscalationStatus::Resolved {
                continue;
            }
            if log.set_status(EscalationStatus::Resolved, now).is_ok() {
                if let Err(err) = ctx.repos.escalation_logs.save(&log).await {
                    error!("Unable to resolve escalation {}. Err: {:?}", log.id, err);
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::reminder::{
        acknowledge_reminder::AcknowledgeReminderUseCase,
        escalate_reminder::EscalateReminderUseCase,
        test_helpers::{create_reminder, setup_user, HOUR},
    };
    use crate::shared::usecase::{execute, UseCase};
    use steward_domain::{AcknowledgeAction, EscalationStatus, Role, ID};
    use steward_infra::StewardContext;

    #[actix_web::test]
    async fn confirming_a_reminder_resolves_its_escalations() {
        let ctx = StewardContext::create_inmemory();
        let church_id = ID::new();
        let worker = setup_user(&ctx, &church_id, Role::Worker).await;
        let admin = setup_user(&ctx, &church_id, Role::Admin).await;
        let (reminder, _) = create_reminder(&worker, HOUR).execute(&ctx).await.unwrap();
        execute(
            EscalateReminderUseCase {
                church_id: church_id.clone(),
                reminder_id: reminder.id.clone(),
                from_user_id: worker.id.clone(),
                to_user_id: admin.id.clone(),
                reason: None,
            },
            &ctx,
        )
        .await
        .unwrap();

        execute(
            AcknowledgeReminderUseCase {
                church_id: church_id.clone(),
                user_id: admin.id.clone(),
                reminder_id: reminder.id.clone(),
                action: AcknowledgeAction::Confirmed,
                snooze_duration: None,
            },
            &ctx,
        )
        .await
        .unwrap();

        let logs = ctx
            .repos
            .escalation_logs
            .find_by_reminder(&reminder.id)
            .await
            .unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, EscalationStatus::Resolved);
        assert!(logs[0].resolved_at.is_some());
    }
}
