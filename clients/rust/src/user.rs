use crate::{APIResponse, BaseClient, ID};
use reqwest::StatusCode;
use std::sync::Arc;
use steward_api_structs::*;

#[derive(Clone)]
pub struct UserClient {
    base: Arc<BaseClient>,
}

pub type CreateUserInput = create_user::RequestBody;

impl UserClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Requires the admin secret
    pub async fn create(&self, input: CreateUserInput) -> APIResponse<create_user::APIResponse> {
        self.base
            .post(input, "admin/users".into(), StatusCode::CREATED)
            .await
    }

    /// Requires the admin secret
    pub async fn issue_token(
        &self,
        user_id: ID,
        expires_in_secs: Option<i64>,
    ) -> APIResponse<issue_token::APIResponse> {
        let body = issue_token::RequestBody { expires_in_secs };
        self.base
            .post(
                body,
                format!("admin/users/{}/tokens", user_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn me(&self) -> APIResponse<get_me::APIResponse> {
        self.base.get("me".into(), StatusCode::OK).await
    }
}
