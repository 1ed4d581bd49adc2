use crate::error::StewardError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use steward_api_structs::mark_notification_read::*;
use steward_domain::{Notification, ID};
use steward_infra::StewardContext;

pub async fn mark_notification_read_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<StewardContext>,
) -> Result<HttpResponse, StewardError> {
    let (user, _) = protect_route(&http_req, &ctx).await?;

    let usecase = MarkNotificationReadUseCase {
        user_id: user.id,
        notification_id: path_params.notification_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|notification| HttpResponse::Ok().json(APIResponse::new(notification)))
        .map_err(StewardError::from)
}

#[derive(Debug)]
pub struct MarkNotificationReadUseCase {
    pub user_id: ID,
    pub notification_id: ID,
}

#[derive(Debug, PartialEq)]
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
impl UseCase for MarkNotificationReadUseCase {
    type Response = Notification;
    type Error = UseCaseError;

    const NAME: &'static str = "MarkNotificationRead";

    async fn execute(&mut self, ctx: &StewardContext) -> Result<Self::Response, Self::Error> {
        let mut notification = match ctx.repos.notifications.find(&self.notification_id).await {
            Some(n) if n.user_id == self.user_id => n,
            _ => return Err(UseCaseError::NotFound(self.notification_id.clone())),
        };

        notification.mark_read(ctx.sys.get_timestamp_millis());
        ctx.repos
            .notifications
            .save(&notification)
            .await
            .map(|_| notification)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::notification::create_notification::CreateNotificationUseCase;
    use std::sync::Arc;
    use steward_domain::{NotificationType, Priority, Role, User};
    use steward_infra::StaticTimeSys;

    #[actix_web::test]
    async fn keeps_the_first_read_time() {
        let mut ctx = StewardContext::create_inmemory();
        let sys = Arc::new(StaticTimeSys::new(1000));
        ctx.sys = sys.clone();
        let user = User::new(ID::new(), Role::Member, 0);
        ctx.repos.users.insert(&user).await.unwrap();
        let notification = CreateNotificationUseCase::reminder_action(
            &user.church_id,
            &user.id,
            &ID::new(),
            NotificationType::Reminder,
            Priority::High,
            "Hospital visit".into(),
            None,
        )
        .execute(&ctx)
        .await
        .unwrap();

        let mut usecase = MarkNotificationReadUseCase {
            user_id: user.id.clone(),
            notification_id: notification.id.clone(),
        };
        sys.set_timestamp_millis(2000);
        assert_eq!(usecase.execute(&ctx).await.unwrap().read_at, Some(2000));
        sys.set_timestamp_millis(3000);
        let again = usecase.execute(&ctx).await.unwrap();
        assert!(again.read);
        assert_eq!(again.read_at, Some(2000));
    }

    #[actix_web::test]
    async fn only_the_recipient_can_read() {
        let ctx = StewardContext::create_inmemory();
        let user = User::new(ID::new(), Role::Member, 0);
        ctx.repos.users.insert(&user).await.unwrap();
        let notification = CreateNotificationUseCase::reminder_action(
            &user.church_id,
            &user.id,
            &ID::new(),
            NotificationType::Reminder,
            Priority::High,
            "Hospital visit".into(),
            None,
        )
        .execute(&ctx)
        .await
        .unwrap();

        let mut usecase = MarkNotificationReadUseCase {
            user_id: ID::new(),
            notification_id: notification.id.clone(),
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound(notification.id)
        );
    }
}
