use crate::error::StewardError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use steward_api_structs::get_escalation_rules::APIResponse;
use steward_domain::{EscalationRule, ID};
use steward_infra::StewardContext;

pub async fn get_escalation_rules_controller(
    http_req: HttpRequest,
    ctx: web::Data<StewardContext>,
) -> Result<HttpResponse, StewardError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = GetEscalationRulesUseCase {
        church_id: user.church_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|rules| HttpResponse::Ok().json(APIResponse::new(rules)))
        .map_err(StewardError::from)
}

#[derive(Debug)]
pub struct GetEscalationRulesUseCase {
    pub church_id: ID,
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
impl UseCase for GetEscalationRulesUseCase {
    type Response = Vec<EscalationRule>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetEscalationRules";

    async fn execute(&mut self, ctx: &StewardContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .escalation_rules
            .find_by_church(&self.church_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
