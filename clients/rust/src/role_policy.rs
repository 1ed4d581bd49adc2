use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use steward_api_structs::*;
use steward_domain::Role;

#[derive(Clone)]
pub struct RolePolicyClient {
    base: Arc<BaseClient>,
}

pub type SetRolePolicyInput = set_role_policy::RequestBody;

impl RolePolicyClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get(&self, role: Role) -> APIResponse<get_role_policy::APIResponse> {
        self.base
            .get(format!("role-policies/{}", role), StatusCode::OK)
            .await
    }

    pub async fn set(
        &self,
        role: Role,
        input: SetRolePolicyInput,
    ) -> APIResponse<set_role_policy::APIResponse> {
        self.base
            .put(input, format!("role-policies/{}", role), StatusCode::OK)
            .await
    }
}
