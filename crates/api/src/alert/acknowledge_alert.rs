use crate::error::StewardError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use steward_api_structs::acknowledge_alert::*;
use steward_domain::{DashboardAlert, ID};
use steward_infra::StewardContext;

pub async fn acknowledge_alert_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<StewardContext>,
) -> Result<HttpResponse, StewardError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = AcknowledgeAlertUseCase {
        user_id: user.id,
        alert_id: path_params.alert_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|alert| HttpResponse::Ok().json(APIResponse::new(alert)))
        .map_err(StewardError::from)
}

/// Marks an alert as seen, it stays on the dashboard until dismissed
#[derive(Debug)]
pub struct AcknowledgeAlertUseCase {
    pub user_id: ID,
    pub alert_id: ID,
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
                Self::NotFound(format!("An alert with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for AcknowledgeAlertUseCase {
    type Response = DashboardAlert;
    type Error = UseCaseError;

    const NAME: &'static str = "AcknowledgeAlert";

    async fn execute(&mut self, ctx: &StewardContext) -> Result<Self::Response, Self::Error> {
        let mut alert = match ctx.repos.alerts.find(&self.alert_id).await {
            Some(alert) if alert.user_id == self.user_id => alert,
            _ => return Err(UseCaseError::NotFound(self.alert_id.clone())),
        };

        alert.acknowledge(ctx.sys.get_timestamp_millis());
        ctx.repos
            .alerts
            .save(&alert)
            .await
            .map(|_| alert)
            .map_err(|_| UseCaseError::StorageError)
    }
}
