use crate::error::StewardError;
use crate::shared::{
    auth::{protect_route, Permission},
    role_policies::effective_role_policy,
    usecase::{execute_with_policy, PermissionBoundary, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use steward_api_structs::escalate_reminder::*;
use steward_domain::{EscalationLog, Reminder, ReminderStateError, Role, ID};
use steward_infra::{StewardContext, UpdateResult};
use tracing::error;

pub async fn escalate_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<StewardContext>,
) -> Result<HttpResponse, StewardError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = EscalateReminderUseCase {
        church_id: user.church_id,
        reminder_id: path_params.reminder_id.clone(),
        from_user_id: user.id,
        to_user_id: body.to_user_id,
        reason: body.reason,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.reminder, res.escalation)))
        .map_err(StewardError::from)
}

/// Hands a `Reminder` over to a supervisor of its owner.
///
/// The `EscalationLog` is stored before the `Reminder` is updated and both
/// writes are idempotent, so retrying after a partial failure completes
/// the escalation without duplicating anything.
#[derive(Debug)]
pub struct EscalateReminderUseCase {
    pub church_id: ID,
    pub reminder_id: ID,
    /// Owner of the `Reminder`
    pub from_user_id: ID,
    pub to_user_id: ID,
    pub reason: Option<String>,
}

#[derive(Debug, PartialEq)]
pub struct UseCaseResponse {
    pub reminder: Reminder,
    pub escalation: EscalationLog,
    /// Set when this execution escalated the `Reminder`,
    /// unset when it already was escalated to the same target
    pub escalated_now: bool,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    SameUser,
    NotFound(ID),
    NotOwner,
    ReminderClosed,
    AlreadyEscalated,
    NoEscalationTarget(Role),
    InvalidEscalationTarget(ID),
    VersionConflict,
    StorageError,
}

impl From<UseCaseError> for StewardError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::SameUser => {
                Self::BadClientData("A reminder can not be escalated to its owner".into())
            }
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("A reminder with id: {}, was not found.", id))
            }
            UseCaseError::NotOwner => {
                Self::BadClientData("Only the owner of a reminder can escalate it".into())
            }
            UseCaseError::ReminderClosed => {
                Self::Conflict("Only active reminders can be escalated".into())
            }
            UseCaseError::AlreadyEscalated => {
                Self::Conflict("The reminder is already escalated to another user".into())
            }
            UseCaseError::NoEscalationTarget(role) => Self::PolicyViolation(format!(
                "Reminders of members with the role {} can not be escalated",
                role
            )),
            UseCaseError::InvalidEscalationTarget(id) => Self::PolicyViolation(format!(
                "The user with id: {}, is not a valid escalation target",
                id
            )),
            UseCaseError::VersionConflict => Self::Conflict(
                "The reminder was changed by somebody else, fetch it and try again".into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl EscalateReminderUseCase {
    async fn find_existing_log(
        &self,
        ctx: &StewardContext,
    ) -> Result<EscalationLog, UseCaseError> {
        ctx.repos
            .escalation_logs
            .find_by_reminder(&self.reminder_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .into_iter()
            .find(|log| log.escalated_to == self.to_user_id)
            .ok_or(UseCaseError::StorageError)
    }

    /// Removes the log to `to_user_id` left by an escalation that lost the
    /// race for the `Reminder` to an escalation to somebody else
    async fn discard_orphaned_log(&self, ctx: &StewardContext) {
        let logs = match ctx
            .repos
            .escalation_logs
            .find_by_reminder(&self.reminder_id)
            .await
        {
            Ok(logs) => logs,
            Err(e) => {
                error!("Unable to find escalation logs. Err: {:?}", e);
                return;
            }
        };
        for log in logs
            .into_iter()
            .filter(|log| log.escalated_to == self.to_user_id)
        {
            if let Err(e) = ctx.repos.escalation_logs.delete(&log.id).await {
                error!("Unable to delete orphaned escalation log {}. Err: {:?}", log.id, e);
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for EscalateReminderUseCase {
    type Response = UseCaseResponse;
    type Error = UseCaseError;

    const NAME: &'static str = "EscalateReminder";

    async fn execute(&mut self, ctx: &StewardContext) -> Result<Self::Response, Self::Error> {
        if self.from_user_id == self.to_user_id {
            return Err(UseCaseError::SameUser);
        }
        let mut reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(reminder) if reminder.church_id == self.church_id => reminder,
            _ => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };
        if reminder.user_id != self.from_user_id {
            return Err(UseCaseError::NotOwner);
        }
        if reminder.is_closed() {
            return Err(UseCaseError::ReminderClosed);
        }
        match &reminder.escalated_to {
            Some(target) if *target == self.to_user_id => {
                return Ok(UseCaseResponse {
                    escalation: self.find_existing_log(ctx).await?,
                    reminder,
                    escalated_now: false,
                });
            }
            Some(_) => {
                self.discard_orphaned_log(ctx).await;
                return Err(UseCaseError::AlreadyEscalated);
            }
            None => {}
        }

        let owner = ctx
            .repos
            .users
            .find(&reminder.user_id)
            .await
            .ok_or(UseCaseError::StorageError)?;
        let (policy, _) = effective_role_policy(&self.church_id, owner.role, ctx).await;
        let target_role = policy
            .escalate_to
            .ok_or(UseCaseError::NoEscalationTarget(owner.role))?;
        match ctx.repos.users.find(&self.to_user_id).await {
            Some(target) if target.church_id == self.church_id && target.role == target_role => {}
            _ => {
                return Err(UseCaseError::InvalidEscalationTarget(
                    self.to_user_id.clone(),
                ))
            }
        }

        let now = ctx.sys.get_timestamp_millis();
        let log = EscalationLog::new(
            &reminder.id,
            &self.from_user_id,
            &self.to_user_id,
            self.reason.clone(),
            now,
        );
        let inserted = ctx
            .repos
            .escalation_logs
            .insert_if_absent(&log)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let escalation = if inserted {
            log
        } else {
            self.find_existing_log(ctx).await?
        };

        reminder
            .escalate(&self.to_user_id, now)
            .map_err(|e| match e {
                ReminderStateError::AlreadyEscalated => UseCaseError::AlreadyEscalated,
                _ => UseCaseError::ReminderClosed,
            })?;
        match ctx.repos.reminders.save(&reminder).await {
            Ok(UpdateResult::Updated) => {
                reminder.version += 1;
                Ok(UseCaseResponse {
                    reminder,
                    escalation,
                    escalated_now: true,
                })
            }
            Ok(UpdateResult::VersionConflict) => {
                let stored = ctx.repos.reminders.find(&self.reminder_id).await;
                let escalated_to_us = stored
                    .map(|r| r.escalated_to.as_ref() == Some(&self.to_user_id))
                    .unwrap_or(false);
                if !escalated_to_us {
                    self.discard_orphaned_log(ctx).await;
                }
                Err(UseCaseError::VersionConflict)
            }
            Err(_) => Err(UseCaseError::StorageError),
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(super::subscribers::NotifyTargetOnReminderEscalated)]
    }
}

impl PermissionBoundary for EscalateReminderUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::EscalateReminder]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::test_helpers::{create_reminder, setup_user, HOUR};
    use crate::shared::usecase::execute;
    use std::sync::Arc;
    use steward_domain::{AcknowledgeAction, AlertType, EscalationStatus, NotificationType, User};
    use steward_infra::StaticTimeSys;

    const NOW: i64 = 1_700_000_000_000;

    struct TestContext {
        ctx: StewardContext,
        worker: User,
        admin: User,
        reminder: Reminder,
    }

    async fn setup() -> TestContext {
        let mut ctx = StewardContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys::new(NOW));
        let church_id = ID::new();
        let worker = setup_user(&ctx, &church_id, Role::Worker).await;
        let admin = setup_user(&ctx, &church_id, Role::Admin).await;
        let (reminder, _) = create_reminder(&worker, NOW + 2 * HOUR)
            .execute(&ctx)
            .await
            .unwrap();
        TestContext {
            ctx,
            worker,
            admin,
            reminder,
        }
    }

    fn escalate(from: &User, to: &User, reminder: &Reminder) -> EscalateReminderUseCase {
        EscalateReminderUseCase {
            church_id: from.church_id.clone(),
            reminder_id: reminder.id.clone(),
            from_user_id: from.id.clone(),
            to_user_id: to.id.clone(),
            reason: Some("no response".into()),
        }
    }

    #[actix_web::test]
    async fn escalates_to_an_admin() {
        let TestContext {
            ctx,
            worker,
            admin,
            reminder,
        } = setup().await;

        let res = escalate(&worker, &admin, &reminder)
            .execute(&ctx)
            .await
            .unwrap();

        assert!(res.escalated_now);
        assert!(res.reminder.escalated);
        assert_eq!(res.reminder.escalated_to, Some(admin.id.clone()));
        assert_eq!(res.reminder.escalated_at, Some(NOW));
        let logs = ctx
            .repos
            .escalation_logs
            .find_by_reminder(&reminder.id)
            .await
            .unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, EscalationStatus::Pending);
        assert_eq!(logs[0].reason.as_deref(), Some("no response"));
        assert_eq!(logs[0], res.escalation);
        assert_eq!(ctx.repos.reminders.find(&reminder.id).await, Some(res.reminder));
    }

    #[actix_web::test]
    async fn escalating_twice_keeps_one_log() {
        let TestContext {
            ctx,
            worker,
            admin,
            reminder,
        } = setup().await;

        let first = execute(escalate(&worker, &admin, &reminder), &ctx)
            .await
            .unwrap();
        let second = execute(escalate(&worker, &admin, &reminder), &ctx)
            .await
            .unwrap();

        assert!(!second.escalated_now);
        assert_eq!(first.escalation, second.escalation);
        assert_eq!(
            ctx.repos
                .escalation_logs
                .find_by_reminder(&reminder.id)
                .await
                .unwrap()
                .len(),
            1
        );
        // Only the first escalation reaches the admin
        let notifications = ctx.repos.notifications.find_feed(&admin.id, 20).await.unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(
            notifications[0].notification_type,
            NotificationType::Escalation
        );
        assert!(notifications[0].requires_action);
        let alerts = ctx.repos.alerts.find_active(&admin.id, 10).await.unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::EscalatedIssue);
    }

    #[actix_web::test]
    async fn completes_an_escalation_interrupted_after_the_log_was_stored() {
        let TestContext {
            ctx,
            worker,
            admin,
            reminder,
        } = setup().await;
        let log = EscalationLog::new(&reminder.id, &worker.id, &admin.id, None, NOW - 10);
        ctx.repos.escalation_logs.insert_if_absent(&log).await.unwrap();

        let res = escalate(&worker, &admin, &reminder)
            .execute(&ctx)
            .await
            .unwrap();
        assert!(res.escalated_now);
        assert_eq!(res.escalation, log);
        assert_eq!(res.reminder.escalated_to, Some(admin.id.clone()));
    }

    #[actix_web::test]
    async fn discards_the_log_of_an_escalation_that_lost_the_race() {
        let TestContext {
            ctx,
            worker,
            admin,
            reminder,
        } = setup().await;
        let second_admin = setup_user(&ctx, &worker.church_id, Role::Admin).await;
        // Stored by an escalation that lost the version check
        let lost = EscalationLog::new(&reminder.id, &worker.id, &second_admin.id, None, NOW);
        ctx.repos.escalation_logs.insert_if_absent(&lost).await.unwrap();
        escalate(&worker, &admin, &reminder)
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(
            escalate(&worker, &second_admin, &reminder)
                .execute(&ctx)
                .await,
            Err(UseCaseError::AlreadyEscalated)
        );
        assert!(ctx
            .repos
            .escalation_logs
            .find_by_target(&second_admin.id)
            .await
            .unwrap()
            .is_empty());
        let logs = ctx
            .repos
            .escalation_logs
            .find_by_reminder(&reminder.id)
            .await
            .unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].escalated_to, admin.id);
    }

    #[actix_web::test]
    async fn rejects_invalid_escalations() {
        let TestContext {
            ctx,
            worker,
            admin,
            reminder,
        } = setup().await;

        assert_eq!(
            escalate(&worker, &worker, &reminder).execute(&ctx).await,
            Err(UseCaseError::SameUser)
        );
        assert_eq!(
            escalate(&admin, &worker, &reminder).execute(&ctx).await,
            Err(UseCaseError::NotOwner)
        );
        let colleague = setup_user(&ctx, &worker.church_id, Role::Worker).await;
        assert_eq!(
            escalate(&worker, &colleague, &reminder).execute(&ctx).await,
            Err(UseCaseError::InvalidEscalationTarget(colleague.id.clone()))
        );
        let other_church_admin = setup_user(&ctx, &ID::new(), Role::Admin).await;
        assert_eq!(
            escalate(&worker, &other_church_admin, &reminder)
                .execute(&ctx)
                .await,
            Err(UseCaseError::InvalidEscalationTarget(
                other_church_admin.id.clone()
            ))
        );

        let second_admin = setup_user(&ctx, &worker.church_id, Role::Admin).await;
        escalate(&worker, &admin, &reminder)
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(
            escalate(&worker, &second_admin, &reminder)
                .execute(&ctx)
                .await,
            Err(UseCaseError::AlreadyEscalated)
        );
    }

    #[actix_web::test]
    async fn members_without_escalation_role_can_not_escalate() {
        let TestContext { ctx, admin, .. } = setup().await;
        let member = setup_user(&ctx, &admin.church_id, Role::Member).await;
        let (reminder, _) = create_reminder(&member, NOW + HOUR)
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(
            escalate(&member, &admin, &reminder).execute(&ctx).await,
            Err(UseCaseError::NoEscalationTarget(Role::Member))
        );
    }

    #[actix_web::test]
    async fn closed_reminders_can_not_be_escalated() {
        let TestContext {
            ctx,
            worker,
            admin,
            mut reminder,
        } = setup().await;
        reminder
            .acknowledge(AcknowledgeAction::Confirmed, NOW)
            .unwrap();
        ctx.repos.reminders.save(&reminder).await.unwrap();

        assert_eq!(
            escalate(&worker, &admin, &reminder).execute(&ctx).await,
            Err(UseCaseError::ReminderClosed)
        );
    }
}
