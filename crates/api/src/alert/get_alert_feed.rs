use crate::error::StewardError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use steward_api_structs::get_alert_feed::APIResponse;
use steward_domain::{AlertFeed, ID};
use steward_infra::StewardContext;

pub async fn get_alert_feed_controller(
    http_req: HttpRequest,
    ctx: web::Data<StewardContext>,
) -> Result<HttpResponse, StewardError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = GetAlertFeedUseCase { user_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|feed| {
            HttpResponse::Ok().json(APIResponse::new(
                feed,
                ctx.config.client_poll_interval_secs,
            ))
        })
        .map_err(StewardError::from)
}

/// Everything the notification bell and the dashboard banners show
#[derive(Debug)]
pub struct GetAlertFeedUseCase {
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
impl UseCase for GetAlertFeedUseCase {
    type Response = AlertFeed;
    type Error = UseCaseError;

    const NAME: &'static str = "GetAlertFeed";

    async fn execute(&mut self, ctx: &StewardContext) -> Result<Self::Response, Self::Error> {
        let notifications_limit = ctx.config.feed_notifications_limit;
        let alerts_limit = ctx.config.feed_alerts_limit;

        let notifications = ctx
            .repos
            .notifications
            .find_feed(&self.user_id, notifications_limit)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let alerts = ctx
            .repos
            .alerts
            .find_active(&self.user_id, alerts_limit)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(AlertFeed::new(
            notifications,
            alerts,
            notifications_limit,
            alerts_limit,
        ))
    }
}
