use steward_domain::{Role, RolePolicy, ID};
use steward_infra::StewardContext;

/// The `RolePolicy` for the `Role` in the church, the stored church override
/// if there is one and the configured default otherwise. The flag tells
/// whether it was overridden.
pub async fn effective_role_policy(
    church_id: &ID,
    role: Role,
    ctx: &StewardContext,
) -> (RolePolicy, bool) {
    match ctx.repos.role_policies.find(church_id, role).await {
        Some(tenant_policy) => (tenant_policy.policy, true),
        None => (ctx.config.role_policies.get(role).clone(), false),
    }
}
