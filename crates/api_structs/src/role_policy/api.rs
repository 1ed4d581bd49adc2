use serde::{Deserialize, Serialize};
use steward_domain::{Role, RolePolicy};

#[derive(Debug, Deserialize, Serialize)]
pub struct RolePathParams {
    pub role: Role,
}

/// The `RolePolicy` in effect for a `Role` in the callers church
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePolicyResponse {
    pub role: Role,
    pub policy: RolePolicy,
    /// Whether the church has overridden the default policy
    pub overridden: bool,
}

impl RolePolicyResponse {
    pub fn new(role: Role, policy: RolePolicy, overridden: bool) -> Self {
        Self {
            role,
            policy,
            overridden,
        }
    }
}

pub mod get_role_policy {
    use super::*;

    pub type PathParams = RolePathParams;
    pub type APIResponse = RolePolicyResponse;
}

pub mod set_role_policy {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// Lead time tokens like `24h`, `90m` or `2d`
        pub offsets: Vec<String>,
        #[serde(default)]
        pub escalate_to: Option<Role>,
        pub snooze_limit: i64,
    }

    pub type PathParams = RolePathParams;
    pub type APIResponse = RolePolicyResponse;
}
