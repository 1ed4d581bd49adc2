use crate::error::StewardError;
use crate::shared::{
    auth::protect_route,
    role_policies::effective_role_policy,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use steward_api_structs::get_role_policy::*;
use steward_domain::{Role, RolePolicy, ID};
use steward_infra::StewardContext;

pub async fn get_role_policy_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<StewardContext>,
) -> Result<HttpResponse, StewardError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let role = path_params.role;
    let usecase = GetRolePolicyUseCase {
        church_id: user.church_id,
        role,
    };

    execute(usecase, &ctx)
        .await
        .map(|(policy, overridden)| {
            HttpResponse::Ok().json(APIResponse::new(role, policy, overridden))
        })
        .map_err(StewardError::from)
}

/// The `RolePolicy` in effect for the `Role` in the church
#[derive(Debug)]
pub struct GetRolePolicyUseCase {
    pub church_id: ID,
    pub role: Role,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for StewardError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetRolePolicyUseCase {
    /// The policy and whether it is a church override
    type Response = (RolePolicy, bool);
    type Error = UseCaseError;

    const NAME: &'static str = "GetRolePolicy";

    async fn execute(&mut self, ctx: &StewardContext) -> Result<Self::Response, Self::Error> {
        Ok(effective_role_policy(&self.church_id, self.role, ctx).await)
    }
}
