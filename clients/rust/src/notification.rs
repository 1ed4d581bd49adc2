use crate::{APIResponse, BaseClient, ID};
use reqwest::StatusCode;
use std::sync::Arc;
use steward_api_structs::*;

#[derive(Clone)]
pub struct NotificationClient {
    base: Arc<BaseClient>,
}

pub type CreateNotificationInput = create_notification::RequestBody;

impl NotificationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateNotificationInput,
    ) -> APIResponse<create_notification::APIResponse> {
        self.base
            .post(input, "notifications".into(), StatusCode::CREATED)
            .await
    }

    pub async fn mark_read(
        &self,
        notification_id: ID,
    ) -> APIResponse<mark_notification_read::APIResponse> {
        self.base
            .put(
                (),
                format!("notifications/{}/read", notification_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn dismiss(
        &self,
        notification_id: ID,
    ) -> APIResponse<dismiss_notification::APIResponse> {
        self.base
            .put(
                (),
                format!("notifications/{}/dismiss", notification_id),
                StatusCode::OK,
            )
            .await
    }
}
