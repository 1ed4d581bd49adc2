use crate::error::StewardError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use steward_api_structs::get_reminders::*;
use steward_domain::{Reminder, ReminderStatus, ID};
use steward_infra::StewardContext;

pub async fn get_reminders_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<StewardContext>,
) -> Result<HttpResponse, StewardError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = GetRemindersUseCase {
        church_id: user.church_id,
        user_id: user.id,
        status: query_params.status,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(StewardError::from)
}

/// Lists the `Reminder`s the `User` owns, created or was escalated to,
/// ordered by due time
#[derive(Debug)]
pub struct GetRemindersUseCase {
    pub church_id: ID,
    pub user_id: ID,
    pub status: Option<ReminderStatus>,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for StewardError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetRemindersUseCase {
    type Response = Vec<Reminder>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &StewardContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminders
            .find_by_user(&self.church_id, &self.user_id, self.status)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::test_helpers::{create_reminder, setup_user, HOUR};
    use steward_domain::{AcknowledgeAction, Role};

    #[actix_web::test]
    async fn lists_by_due_time_and_filters_on_status() {
        let ctx = StewardContext::create_inmemory();
        let owner = setup_user(&ctx, &ID::new(), Role::Member).await;
        let (later, _) = create_reminder(&owner, 3 * HOUR).execute(&ctx).await.unwrap();
        let (mut sooner, _) = create_reminder(&owner, HOUR).execute(&ctx).await.unwrap();
        sooner
            .acknowledge(AcknowledgeAction::Confirmed, 10)
            .unwrap();
        ctx.repos.reminders.save(&sooner).await.unwrap();

        let mut usecase = GetRemindersUseCase {
            church_id: owner.church_id.clone(),
            user_id: owner.id.clone(),
            status: None,
        };
        let ids = usecase
            .execute(&ctx)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![sooner.id.clone(), later.id.clone()]);

        let mut usecase = GetRemindersUseCase {
            church_id: owner.church_id.clone(),
            user_id: owner.id.clone(),
            status: Some(ReminderStatus::Active),
        };
        let active = usecase.execute(&ctx).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, later.id);
    }
}
