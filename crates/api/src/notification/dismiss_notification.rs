use crate::error::StewardError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use steward_api_structs::dismiss_notification::*;
use steward_domain::{Notification, ID};
use steward_infra::StewardContext;

pub async fn dismiss_notification_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<StewardContext>,
) -> Result<HttpResponse, StewardError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = DismissNotificationUseCase {
        user_id: user.id,
        notification_id: path_params.notification_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|notification| HttpResponse::Ok().json(APIResponse::new(notification)))
        .map_err(StewardError::from)
}

#[derive(Debug)]
pub struct DismissNotificationUseCase {
    pub user_id: ID,
    pub notification_id: ID,
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
                Self::NotFound(format!("A notification with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DismissNotificationUseCase {
    type Response = Notification;
    type Error = UseCaseError;

    const NAME: &'static str = "DismissNotification";

    async fn execute(&mut self, ctx: &StewardContext) -> Result<Self::Response, Self::Error> {
        let mut notification = match ctx.repos.notifications.find(&self.notification_id).await {
            Some(n) if n.user_id == self.user_id => n,
            _ => return Err(UseCaseError::NotFound(self.notification_id.clone())),
        };

        notification.dismiss(ctx.sys.get_timestamp_millis());
        ctx.repos
            .notifications
            .save(&notification)
            .await
            .map(|_| notification)
            .map_err(|_| UseCaseError::StorageError)
    }
}
