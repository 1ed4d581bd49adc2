use crate::error::StewardError;
use crate::shared::{
    auth::{protect_route, Permission},
    usecase::{execute_with_policy, PermissionBoundary, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use steward_api_structs::set_role_policy::*;
use steward_domain::{ReminderOffset, Role, RolePolicy, TenantRolePolicy, ID};
use steward_infra::StewardContext;

pub async fn set_role_policy_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<StewardContext>,
) -> Result<HttpResponse, StewardError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let role = path_params.role;
    let usecase = SetRolePolicyUseCase {
        church_id: user.church_id,
        role,
        offsets: body.offsets,
        escalate_to: body.escalate_to,
        snooze_limit: body.snooze_limit,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|tenant_policy| {
            HttpResponse::Ok().json(APIResponse::new(role, tenant_policy.policy, true))
        })
        .map_err(StewardError::from)
}

/// Overrides the default `RolePolicy` of a `Role` for one church
#[derive(Debug)]
pub struct SetRolePolicyUseCase {
    pub church_id: ID,
    pub role: Role,
    pub offsets: Vec<String>,
    pub escalate_to: Option<Role>,
    pub snooze_limit: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidOffset(String),
    InvalidSnoozeLimit(i64),
    StorageError,
}

impl From<UseCaseError> for StewardError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidOffset(token) => Self::BadClientData(format!(
                "Invalid offset: {}, expected a number followed by m, h or d",
                token
            )),
            UseCaseError::InvalidSnoozeLimit(limit) => Self::BadClientData(format!(
                "Snooze limit can not be negative, got {}",
                limit
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetRolePolicyUseCase {
    type Response = TenantRolePolicy;
    type Error = UseCaseError;

    const NAME: &'static str = "SetRolePolicy";

    async fn execute(&mut self, ctx: &StewardContext) -> Result<Self::Response, Self::Error> {
        let offsets = self
            .offsets
            .iter()
            .map(|token| {
                token
                    .parse::<ReminderOffset>()
                    .map_err(|_| UseCaseError::InvalidOffset(token.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if self.snooze_limit < 0 {
            return Err(UseCaseError::InvalidSnoozeLimit(self.snooze_limit));
        }

        let mut policy = RolePolicy {
            offsets,
            escalate_to: self.escalate_to,
            snooze_limit: self.snooze_limit,
        };
        policy.sort_offsets();
        let tenant_policy = TenantRolePolicy {
            church_id: self.church_id.clone(),
            role: self.role,
            policy,
            updated: ctx.sys.get_timestamp_millis(),
        };

        ctx.repos
            .role_policies
            .upsert(&tenant_policy)
            .await
            .map(|_| tenant_policy)
            .map_err(|_| UseCaseError::StorageError)
    }
}

impl PermissionBoundary for SetRolePolicyUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::ManageRolePolicies]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::role_policy::get_role_policy::GetRolePolicyUseCase;

    fn set_policy(church_id: &ID, offsets: &[&str], snooze_limit: i64) -> SetRolePolicyUseCase {
        SetRolePolicyUseCase {
            church_id: church_id.clone(),
            role: Role::Worker,
            offsets: offsets.iter().map(|o| o.to_string()).collect(),
            escalate_to: Some(Role::Pastor),
            snooze_limit,
        }
    }

    #[actix_web::test]
    async fn overrides_the_default_policy_for_the_church() {
        let ctx = StewardContext::create_inmemory();
        let church_id = ID::new();
        let default_policy = ctx.config.role_policies.get(Role::Worker).clone();

        let mut usecase = GetRolePolicyUseCase {
            church_id: church_id.clone(),
            role: Role::Worker,
        };
        assert_eq!(usecase.execute(&ctx).await.unwrap(), (default_policy.clone(), false));

        let stored = set_policy(&church_id, &["30m", "2d", "6h", "30m"], 1)
            .execute(&ctx)
            .await
            .unwrap();
        let tokens = stored
            .policy
            .offsets
            .iter()
            .map(|o| o.token().to_string())
            .collect::<Vec<_>>();
        assert_eq!(tokens, vec!["2d", "6h", "30m"]);

        let (policy, overridden) = usecase.execute(&ctx).await.unwrap();
        assert!(overridden);
        assert_eq!(policy, stored.policy);
        assert_eq!(policy.escalate_to, Some(Role::Pastor));

        // Other churches keep the default
        let mut usecase = GetRolePolicyUseCase {
            church_id: ID::new(),
            role: Role::Worker,
        };
        assert_eq!(usecase.execute(&ctx).await.unwrap(), (default_policy, false));
    }

    #[actix_web::test]
    async fn rejects_invalid_offsets_and_limits() {
        let ctx = StewardContext::create_inmemory();
        let church_id = ID::new();

        assert_eq!(
            set_policy(&church_id, &["1h", "5x"], 1).execute(&ctx).await,
            Err(UseCaseError::InvalidOffset("5x".into()))
        );
        assert_eq!(
            set_policy(&church_id, &["1h"], -1).execute(&ctx).await,
            Err(UseCaseError::InvalidSnoozeLimit(-1))
        );
        assert!(ctx
            .repos
            .role_policies
            .find(&church_id, Role::Worker)
            .await
            .is_none());
    }
}
