use super::escalate_reminder::EscalateReminderUseCase;
use crate::alert::raise_alert::RaiseAlertUseCase;
use crate::notification::create_notification::CreateNotificationUseCase;
use crate::shared::{
    role_policies::effective_role_policy,
    usecase::{execute, UseCase},
};
use std::collections::HashMap;
use steward_domain::{AlertType, EscalationRule, NotificationType, Reminder, ReminderType, ID};
use steward_infra::{StewardContext, UpdateResult};
use tracing::{error, info};

/// Escalates or marks as missed the `Reminder`s that are past their
/// effective due time without being acknowledged.
///
/// A `Reminder` matched by an `EscalationRule` of its church is given
/// `escalate_after_minutes` to be acknowledged before it is escalated to
/// a member holding the `escalate_to` role of the owner. When that window
/// has passed again after the escalation, or when no rule applies, the
/// `Reminder` is marked as missed.
///
/// Overdue `Reminder`s are read in pages of `limit`, and `Reminder`s still
/// inside their window are paged past so they never hold back the ones
/// behind them.
#[derive(Debug)]
pub struct SweepOverdueRemindersUseCase {
    /// Maximum number of `Reminder`s escalated or missed in one sweep
    pub limit: usize,
}

#[derive(Debug, Default, PartialEq)]
pub struct SweepResult {
    pub escalated: usize,
    pub missed: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

enum Verdict {
    Wait,
    Escalate(ID),
    Miss,
}

async fn judge(
    reminder: &Reminder,
    rules: &[EscalationRule],
    now: i64,
    ctx: &StewardContext,
) -> Verdict {
    let owner = match ctx.repos.users.find(&reminder.user_id).await {
        Some(owner) => owner,
        None => return Verdict::Miss,
    };
    let rule = match EscalationRule::find_applicable(rules, reminder, owner.role) {
        Some(rule) => rule,
        None => return Verdict::Miss,
    };

    if let Some(escalated_at) = reminder.escalated_at {
        return if now >= escalated_at.saturating_add(rule.window_millis()) {
            Verdict::Miss
        } else {
            Verdict::Wait
        };
    }
    if now < rule.escalate_at(reminder) {
        return Verdict::Wait;
    }

    let (policy, _) = effective_role_policy(&reminder.church_id, owner.role, ctx).await;
    let target_role = match policy.escalate_to {
        Some(role) => role,
        None => return Verdict::Miss,
    };
    match ctx
        .repos
        .users
        .find_by_role(&reminder.church_id, target_role)
        .await
    {
        Ok(candidates) => match candidates.into_iter().find(|u| u.id != owner.id) {
            Some(target) => Verdict::Escalate(target.id),
            None => {
                info!(
                    "No {} in church {} to escalate reminder {} to",
                    target_role, reminder.church_id, reminder.id
                );
                Verdict::Miss
            }
        },
        Err(e) => {
            error!("Unable to find escalation targets. Err: {:?}", e);
            Verdict::Wait
        }
    }
}

async fn mark_missed(mut reminder: Reminder, now: i64, ctx: &StewardContext) -> bool {
    if reminder.mark_missed(now).is_err() {
        return false;
    }
    match ctx.repos.reminders.save(&reminder).await {
        Ok(UpdateResult::Updated) => {}
        // Acknowledged while the sweep was running
        Ok(UpdateResult::VersionConflict) => return false,
        Err(e) => {
            error!("Unable to mark reminder {} as missed. Err: {:?}", reminder.id, e);
            return false;
        }
    }

    let notification = CreateNotificationUseCase::reminder_action(
        &reminder.church_id,
        &reminder.user_id,
        &reminder.id,
        NotificationType::Alert,
        reminder.priority,
        format!("Missed: {}", reminder.title),
        None,
    );
    let _ = execute(notification, ctx).await;

    let alert_type = match reminder.reminder_type {
        ReminderType::Appointment => AlertType::MissedAppointment,
        _ => AlertType::OverdueTask,
    };
    let alert = RaiseAlertUseCase::for_reminder(
        &reminder,
        &reminder.user_id,
        alert_type,
        format!("\"{}\" was not acknowledged in time", reminder.title),
    );
    let _ = execute(alert, ctx).await;
    true
}

#[async_trait::async_trait(?Send)]
impl UseCase for SweepOverdueRemindersUseCase {
    type Response = SweepResult;
    type Error = UseCaseError;

    const NAME: &'static str = "SweepOverdueReminders";

    async fn execute(&mut self, ctx: &StewardContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let mut rules_by_church: HashMap<ID, Vec<EscalationRule>> = HashMap::new();
        let mut res = SweepResult::default();
        let mut after: Option<Reminder> = None;

        while res.escalated + res.missed < self.limit {
            let page = ctx
                .repos
                .reminders
                .find_overdue(now, after.as_ref(), self.limit)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            let last_page = page.len() < self.limit;
            after = page.last().cloned();

            for reminder in page {
                if res.escalated + res.missed >= self.limit {
                    break;
                }
                if !rules_by_church.contains_key(&reminder.church_id) {
                    let rules = ctx
                        .repos
                        .escalation_rules
                        .find_by_church(&reminder.church_id)
                        .await
                        .map_err(|_| UseCaseError::StorageError)?;
                    rules_by_church.insert(reminder.church_id.clone(), rules);
                }
                let rules = rules_by_church
                    .get(&reminder.church_id)
                    .map(|rules| rules.as_slice())
                    .unwrap_or(&[]);

                match judge(&reminder, rules, now, ctx).await {
                    Verdict::Wait => {}
                    Verdict::Escalate(to_user_id) => {
                        let usecase = EscalateReminderUseCase {
                            church_id: reminder.church_id.clone(),
                            reminder_id: reminder.id.clone(),
                            from_user_id: reminder.user_id.clone(),
                            to_user_id,
                            reason: Some("Not acknowledged in time".into()),
                        };
                        if execute(usecase, ctx).await.is_ok() {
                            res.escalated += 1;
                        }
                    }
                    Verdict::Miss => {
                        if mark_missed(reminder, now, ctx).await {
                            res.missed += 1;
                        }
                    }
                }
            }

            if last_page || after.is_none() {
                break;
            }
        }

        Ok(res)
    }
}
