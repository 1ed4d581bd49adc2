use super::get_reminder::find_visible_reminder;
use crate::error::StewardError;
use crate::shared::{
    auth::{protect_route, Permission},
    role_policies::effective_role_policy,
    usecase::{execute_with_policy, PermissionBoundary, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use steward_api_structs::acknowledge_reminder::*;
use steward_domain::{AcknowledgeAction, Reminder, ReminderStateError, ReminderStatus, ID};
use steward_infra::{StewardContext, UpdateResult};

pub async fn acknowledge_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<StewardContext>,
) -> Result<HttpResponse, StewardError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = AcknowledgeReminderUseCase {
        church_id: user.church_id,
        user_id: user.id,
        reminder_id: path_params.reminder_id.clone(),
        action: body.action,
        snooze_duration: body.snooze_duration,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(StewardError::from)
}

/// Records how a member responded to a `Reminder`: confirmed, rescheduled,
/// cancelled or snoozed for `snooze_duration` millis
#[derive(Debug)]
pub struct AcknowledgeReminderUseCase {
    pub church_id: ID,
    pub user_id: ID,
    pub reminder_id: ID,
    pub action: AcknowledgeAction,
    pub snooze_duration: Option<i64>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidSnoozeDuration,
    SnoozeLimitReached(i64),
    ReminderClosed(ReminderStatus),
    VersionConflict,
    StorageError,
}

impl From<UseCaseError> for StewardError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("A reminder with id: {}, was not found.", id))
            }
            UseCaseError::InvalidSnoozeDuration => Self::BadClientData(
                "Snoozing a reminder requires a positive snooze duration".into(),
            ),
            UseCaseError::SnoozeLimitReached(limit) => Self::PolicyViolation(format!(
                "The reminder has already been snoozed the maximum of {} times",
                limit
            )),
            UseCaseError::ReminderClosed(status) => Self::Conflict(format!(
                "The reminder is {} and can no longer be acknowledged",
                status
            )),
            UseCaseError::VersionConflict => Self::Conflict(
                "The reminder was changed by somebody else, fetch it and try again".into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl From<ReminderStateError> for UseCaseError {
    fn from(e: ReminderStateError) -> Self {
        match e {
            ReminderStateError::Closed(status) => Self::ReminderClosed(status),
            ReminderStateError::SnoozeLimitReached(limit) => Self::SnoozeLimitReached(limit),
            ReminderStateError::InvalidSnoozeDuration(_)
            | ReminderStateError::MissingSnoozeDuration => Self::InvalidSnoozeDuration,
            ReminderStateError::Acknowledged | ReminderStateError::AlreadyEscalated => {
                Self::VersionConflict
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for AcknowledgeReminderUseCase {
    type Response = Reminder;
    type Error = UseCaseError;

    const NAME: &'static str = "AcknowledgeReminder";

    async fn execute(&mut self, ctx: &StewardContext) -> Result<Self::Response, Self::Error> {
        let mut reminder =
            find_visible_reminder(&self.church_id, &self.user_id, &self.reminder_id, ctx)
                .await
                .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;
        if reminder.is_closed() {
            return Err(UseCaseError::ReminderClosed(reminder.status));
        }

        let now = ctx.sys.get_timestamp_millis();
        let replacement = match (self.action, self.snooze_duration) {
            (AcknowledgeAction::Snoozed, Some(duration)) => {
                // The snooze limit is the one of the owner, not of whoever snoozes
                let owner = ctx
                    .repos
                    .users
                    .find(&reminder.user_id)
                    .await
                    .ok_or(UseCaseError::StorageError)?;
                let (policy, _) = effective_role_policy(&self.church_id, owner.role, ctx).await;
                Some(reminder.snooze(duration, policy.snooze_limit, now)?)
            }
            (action, _) => {
                reminder.acknowledge(action, now)?;
                None
            }
        };

        match ctx
            .repos
            .reminders
            .save_and_reschedule(&reminder, replacement.as_ref())
            .await
        {
            Ok(UpdateResult::Updated) => {
                reminder.version += 1;
                Ok(reminder)
            }
            Ok(UpdateResult::VersionConflict) => Err(UseCaseError::VersionConflict),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(super::subscribers::ResolveEscalationsOnReminderClosed)]
    }
}

impl PermissionBoundary for AcknowledgeReminderUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::AcknowledgeReminder]
    }
}
