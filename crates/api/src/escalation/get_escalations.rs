use crate::error::StewardError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use steward_api_structs::get_escalations::APIResponse;
use steward_domain::{EscalationLog, ID};
use steward_infra::StewardContext;

pub async fn get_escalations_controller(
    http_req: HttpRequest,
    ctx: web::Data<StewardContext>,
) -> Result<HttpResponse, StewardError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = GetEscalationsUseCase { user_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|escalations| HttpResponse::Ok().json(APIResponse::new(escalations)))
        .map_err(StewardError::from)
}

/// The `EscalationLog`s assigned to the `User`, newest first
#[derive(Debug)]
pub struct GetEscalationsUseCase {
    pub user_id: ID,
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
impl UseCase for GetEscalationsUseCase {
    type Response = Vec<EscalationLog>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetEscalations";

    async fn execute(&mut self, ctx: &StewardContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .escalation_logs
            .find_by_target(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
