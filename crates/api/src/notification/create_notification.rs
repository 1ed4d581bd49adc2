use crate::error::StewardError;
use crate::shared::{
    auth::{protect_route, Permission},
    usecase::{execute_with_policy, PermissionBoundary, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use steward_api_structs::create_notification::*;
use steward_domain::{Notification, NotificationChannel, NotificationType, Priority, ID};
use steward_infra::StewardContext;

pub async fn create_notification_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<StewardContext>,
) -> Result<HttpResponse, StewardError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateNotificationUseCase {
        church_id: user.church_id,
        user_id: body.user_id,
        reminder_id: body.reminder_id,
        title: body.title,
        message: body.message,
        notification_type: body.notification_type.unwrap_or_default(),
        priority: body.priority.unwrap_or_default(),
        channel: body.channel.unwrap_or_default(),
        requires_action: body.requires_action.unwrap_or(false),
        action_url: body.action_url,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|notification| HttpResponse::Created().json(APIResponse::new(notification)))
        .map_err(StewardError::from)
}

/// Delivers a `Notification` to the dashboard of a member
#[derive(Debug)]
pub struct CreateNotificationUseCase {
    pub church_id: ID,
    /// Recipient
    pub user_id: ID,
    pub reminder_id: Option<ID>,
    pub title: String,
    pub message: Option<String>,
    pub notification_type: NotificationType,
    pub priority: Priority,
    pub channel: NotificationChannel,
    pub requires_action: bool,
    pub action_url: Option<String>,
}

impl CreateNotificationUseCase {
    /// Notification about a `Reminder` that the recipient has to act on
    pub fn reminder_action(
        church_id: &ID,
        user_id: &ID,
        reminder_id: &ID,
        notification_type: NotificationType,
        priority: Priority,
        title: String,
        message: Option<String>,
    ) -> Self {
        Self {
            church_id: church_id.clone(),
            user_id: user_id.clone(),
            reminder_id: Some(reminder_id.clone()),
            title,
            message,
            notification_type,
            priority,
            channel: NotificationChannel::Dashboard,
            requires_action: true,
            action_url: Some(format!("/reminders/{}", reminder_id)),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidTitle,
    RecipientNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for StewardError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidTitle => {
                Self::BadClientData("A notification needs a non empty title".into())
            }
            UseCaseError::RecipientNotFound(id) => {
                Self::NotFound(format!("A user with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateNotificationUseCase {
    type Response = Notification;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateNotification";

    async fn execute(&mut self, ctx: &StewardContext) -> Result<Self::Response, Self::Error> {
        if self.title.trim().is_empty() {
            return Err(UseCaseError::InvalidTitle);
        }
        match ctx.repos.users.find(&self.user_id).await {
            Some(recipient) if recipient.church_id == self.church_id => {}
            _ => return Err(UseCaseError::RecipientNotFound(self.user_id.clone())),
        };

        let notification = Notification {
            id: Default::default(),
            church_id: self.church_id.clone(),
            user_id: self.user_id.clone(),
            reminder_id: self.reminder_id.clone(),
            title: self.title.clone(),
            message: self.message.clone(),
            notification_type: self.notification_type,
            priority: self.priority,
            channel: self.channel,
            read: false,
            read_at: None,
            dismissed: false,
            dismissed_at: None,
            requires_action: self.requires_action,
            action_url: self.action_url.clone(),
            created: ctx.sys.get_timestamp_millis(),
        };

        ctx.repos
            .notifications
            .insert(&notification)
            .await
            .map(|_| notification)
            .map_err(|_| UseCaseError::StorageError)
    }
}

impl PermissionBoundary for CreateNotificationUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::SendNotification]
    }
}
