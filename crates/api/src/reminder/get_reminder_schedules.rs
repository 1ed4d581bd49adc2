use super::get_reminder::find_visible_reminder;
use crate::error::StewardError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use steward_api_structs::get_reminder_schedules::*;
use steward_domain::{ReminderSchedule, ID};
use steward_infra::StewardContext;

pub async fn get_reminder_schedules_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<StewardContext>,
) -> Result<HttpResponse, StewardError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = GetReminderSchedulesUseCase {
        church_id: user.church_id,
        user_id: user.id,
        reminder_id: path_params.reminder_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|schedules| HttpResponse::Ok().json(APIResponse::new(schedules)))
        .map_err(StewardError::from)
}

#[derive(Debug)]
pub struct GetReminderSchedulesUseCase {
    pub church_id: ID,
    pub user_id: ID,
    pub reminder_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for StewardError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("A reminder with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderSchedulesUseCase {
    type Response = Vec<ReminderSchedule>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetReminderSchedules";

    async fn execute(&mut self, ctx: &StewardContext) -> Result<Self::Response, Self::Error> {
        let reminder =
            find_visible_reminder(&self.church_id, &self.user_id, &self.reminder_id, ctx)
                .await
                .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;

        ctx.repos
            .reminders
            .find_schedules(&reminder.id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
