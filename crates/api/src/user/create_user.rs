use crate::shared::usecase::{execute, UseCase};
use crate::{error::StewardError, shared::auth::protect_admin_route};
use actix_web::{web, HttpRequest, HttpResponse};
use steward_api_structs::create_user::*;
use steward_domain::{Role, User, ID};
use steward_infra::StewardContext;

pub async fn create_user_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<StewardContext>,
) -> Result<HttpResponse, StewardError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = CreateUserUseCase {
        church_id: body.church_id,
        role: body.role,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Created().json(APIResponse::new(user)))
        .map_err(StewardError::from)
}

/// Registers a member of a church so that reminders can be created for it
#[derive(Debug)]
pub struct CreateUserUseCase {
    pub church_id: ID,
    pub role: Role,
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
impl UseCase for CreateUserUseCase {
    type Response = User;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateUser";

    async fn execute(&mut self, ctx: &StewardContext) -> Result<Self::Response, Self::Error> {
        let user = User::new(
            self.church_id.clone(),
            self.role,
            ctx.sys.get_timestamp_millis(),
        );

        ctx.repos
            .users
            .insert(&user)
            .await
            .map(|_| user)
            .map_err(|_| UseCaseError::StorageError)
    }
}
