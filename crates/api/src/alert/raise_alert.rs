use crate::error::StewardError;
use crate::shared::{
    auth::{protect_route, Permission},
    usecase::{execute_with_policy, PermissionBoundary, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use steward_api_structs::raise_alert::*;
use steward_domain::{
    AlertEntityType, AlertSeverity, AlertType, DashboardAlert, EntityRef, Reminder, ID,
};
use steward_infra::StewardContext;

pub async fn raise_alert_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<StewardContext>,
) -> Result<HttpResponse, StewardError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = RaiseAlertUseCase {
        church_id: user.church_id,
        user_id: body.user_id,
        alert_type: body.alert_type,
        related_entity: body.related_entity,
        severity: body.severity.unwrap_or_default(),
        message: body.message,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|alert| HttpResponse::Created().json(APIResponse::new(alert)))
        .map_err(StewardError::from)
}

/// Puts a `DashboardAlert` on the dashboard of a member
#[derive(Debug)]
pub struct RaiseAlertUseCase {
    pub church_id: ID,
    /// Recipient
    pub user_id: ID,
    pub alert_type: AlertType,
    pub related_entity: Option<EntityRef<AlertEntityType>>,
    pub severity: AlertSeverity,
    pub message: Option<String>,
}

impl RaiseAlertUseCase {
    /// Alert about the `Reminder` with a severity following its priority
    pub fn for_reminder(
        reminder: &Reminder,
        user_id: &ID,
        alert_type: AlertType,
        message: String,
    ) -> Self {
        Self {
            church_id: reminder.church_id.clone(),
            user_id: user_id.clone(),
            alert_type,
            related_entity: Some(EntityRef::new(
                AlertEntityType::Reminder,
                reminder.id.clone(),
            )),
            severity: AlertSeverity::for_priority(reminder.priority),
            message: Some(message),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    RecipientNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for StewardError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::RecipientNotFound(id) => {
                Self::NotFound(format!("A user with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RaiseAlertUseCase {
    type Response = DashboardAlert;
    type Error = UseCaseError;

    const NAME: &'static str = "RaiseAlert";

    async fn execute(&mut self, ctx: &StewardContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.users.find(&self.user_id).await {
            Some(recipient) if recipient.church_id == self.church_id => {}
            _ => return Err(UseCaseError::RecipientNotFound(self.user_id.clone())),
        };

        let alert = DashboardAlert {
            id: Default::default(),
            church_id: self.church_id.clone(),
            user_id: self.user_id.clone(),
            alert_type: self.alert_type,
            related_entity: self.related_entity.clone(),
            severity: self.severity,
            message: self.message.clone(),
            active: true,
            acknowledged_at: None,
            dismissed_by: None,
            dismissed_at: None,
            created: ctx.sys.get_timestamp_millis(),
        };

        ctx.repos
            .alerts
            .insert(&alert)
            .await
            .map(|_| alert)
            .map_err(|_| UseCaseError::StorageError)
    }
}

impl PermissionBoundary for RaiseAlertUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::RaiseAlert]
    }
}
