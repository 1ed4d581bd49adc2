use crate::{APIResponse, BaseClient, ID};
use reqwest::StatusCode;
use std::sync::Arc;
use steward_api_structs::*;

#[derive(Clone)]
pub struct AlertClient {
    base: Arc<BaseClient>,
}

pub type RaiseAlertInput = raise_alert::RequestBody;

impl AlertClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn raise(&self, input: RaiseAlertInput) -> APIResponse<raise_alert::APIResponse> {
        self.base
            .post(input, "alerts".into(), StatusCode::CREATED)
            .await
    }

    pub async fn dismiss(&self, alert_id: ID) -> APIResponse<dismiss_alert::APIResponse> {
        self.base
            .put((), format!("alerts/{}/dismiss", alert_id), StatusCode::OK)
            .await
    }

    pub async fn acknowledge(&self, alert_id: ID) -> APIResponse<acknowledge_alert::APIResponse> {
        self.base
            .put((), format!("alerts/{}/acknowledge", alert_id), StatusCode::OK)
            .await
    }

    /// What the notification bell and the dashboard banners show
    pub async fn feed(&self) -> APIResponse<get_alert_feed::APIResponse> {
        self.base.get("feed".into(), StatusCode::OK).await
    }
}
