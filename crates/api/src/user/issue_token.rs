use crate::shared::{
    auth::{create_user_token, protect_admin_route},
    usecase::{execute, UseCase},
};
use crate::error::StewardError;
use actix_web::{web, HttpRequest, HttpResponse};
use steward_api_structs::issue_token::*;
use steward_domain::ID;
use steward_infra::StewardContext;
use tracing::error;

const DEFAULT_TOKEN_VALIDITY_SECS: i64 = 60 * 60 * 24;

pub async fn issue_token_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: Option<web::Json<RequestBody>>,
    ctx: web::Data<StewardContext>,
) -> Result<HttpResponse, StewardError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = IssueTokenUseCase {
        user_id: path_params.user_id.clone(),
        expires_in_secs: body
            .and_then(|body| body.0.expires_in_secs)
            .unwrap_or(DEFAULT_TOKEN_VALIDITY_SECS),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                token: res.token,
                expires: res.expires,
            })
        })
        .map_err(StewardError::from)
}

/// Issues a session token for a member, used by the part of the
/// application that signs members in
#[derive(Debug)]
pub struct IssueTokenUseCase {
    pub user_id: ID,
    pub expires_in_secs: i64,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub token: String,
    pub expires: i64,
}

#[derive(Debug)]
pub enum UseCaseError {
    UserNotFound(ID),
    InvalidExpiry(i64),
    TokenError,
}

impl From<UseCaseError> for StewardError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserNotFound(id) => {
                Self::NotFound(format!("A user with id: {}, was not found.", id))
            }
            UseCaseError::InvalidExpiry(secs) => Self::BadClientData(format!(
                "Tokens must be valid for a positive number of seconds, got: {}",
                secs
            )),
            UseCaseError::TokenError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for IssueTokenUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "IssueToken";

    async fn execute(&mut self, ctx: &StewardContext) -> Result<Self::Response, Self::Error> {
        if self.expires_in_secs <= 0 {
            return Err(UseCaseError::InvalidExpiry(self.expires_in_secs));
        }
        let user = ctx
            .repos
            .users
            .find(&self.user_id)
            .await
            .ok_or_else(|| UseCaseError::UserNotFound(self.user_id.clone()))?;

        let now = ctx.sys.get_timestamp_millis();
        let expires = now + self.expires_in_secs * 1000;
        let token = create_user_token(&user, &ctx.config.jwt_secret, now, expires).map_err(|e| {
            error!("Unable to create session token: {:?}", e);
            UseCaseError::TokenError
        })?;

        Ok(UseCaseRes { token, expires })
    }
}
