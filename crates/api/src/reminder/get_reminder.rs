use crate::error::StewardError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use steward_api_structs::get_reminder::*;
use steward_domain::{Reminder, ID};
use steward_infra::StewardContext;

pub async fn get_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<StewardContext>,
) -> Result<HttpResponse, StewardError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = GetReminderUseCase {
        church_id: user.church_id,
        user_id: user.id,
        reminder_id: path_params.reminder_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(StewardError::from)
}

/// Finds a `Reminder` in the church that the `User` owns, created
/// or was escalated to
pub(crate) async fn find_visible_reminder(
    church_id: &ID,
    user_id: &ID,
    reminder_id: &ID,
    ctx: &StewardContext,
) -> Option<Reminder> {
    match ctx.repos.reminders.find(reminder_id).await {
        Some(reminder)
            if reminder.church_id == *church_id
                && (reminder.is_visible_to(user_id) || reminder.created_by == *user_id) =>
        {
            Some(reminder)
        }
        _ => None,
    }
}

#[derive(Debug)]
pub struct GetReminderUseCase {
    pub church_id: ID,
    pub user_id: ID,
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for StewardError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("A reminder with id: {}, was not found.", id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderUseCase {
    type Response = Reminder;
    type Error = UseCaseError;

    const NAME: &'static str = "GetReminder";

    async fn execute(&mut self, ctx: &StewardContext) -> Result<Self::Response, Self::Error> {
        find_visible_reminder(&self.church_id, &self.user_id, &self.reminder_id, ctx)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))
    }
}
