use crate::error::StewardError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use steward_api_structs::update_escalation::*;
use steward_domain::{EscalationLog, EscalationStateError, EscalationStatus, ID};
use steward_infra::StewardContext;

pub async fn update_escalation_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<StewardContext>,
) -> Result<HttpResponse, StewardError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = UpdateEscalationUseCase {
        user_id: user.id,
        escalation_id: path_params.escalation_id.clone(),
        status: body.status,
    };

    execute(usecase, &ctx)
        .await
        .map(|escalation| HttpResponse::Ok().json(APIResponse::new(escalation)))
        .map_err(StewardError::from)
}

/// Lets the escalation target move an `EscalationLog` forward
#[derive(Debug)]
pub struct UpdateEscalationUseCase {
    pub user_id: ID,
    pub escalation_id: ID,
    pub status: EscalationStatus,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidTransition(EscalationStateError),
    StorageError,
}

impl From<UseCaseError> for StewardError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("An escalation with id: {}, was not found.", id))
            }
            UseCaseError::InvalidTransition(e) => Self::Conflict(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateEscalationUseCase {
    type Response = EscalationLog;
    type Error = UseCaseError;

    const NAME: &'static str = "UpdateEscalation";

    async fn execute(&mut self, ctx: &StewardContext) -> Result<Self::Response, Self::Error> {
        let mut log = match ctx.repos.escalation_logs.find(&self.escalation_id).await {
            Some(log) if log.escalated_to == self.user_id => log,
            _ => return Err(UseCaseError::NotFound(self.escalation_id.clone())),
        };

        log.set_status(self.status, ctx.sys.get_timestamp_millis())
            .map_err(UseCaseError::InvalidTransition)?;

        ctx.repos
            .escalation_logs
            .save(&log)
            .await
            .map(|_| log)
            .map_err(|_| UseCaseError::StorageError)
    }
}
