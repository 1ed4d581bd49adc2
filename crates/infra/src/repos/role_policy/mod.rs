mod inmemory;
mod postgres;

pub use inmemory::InMemoryRolePolicyRepo;
pub use postgres::PostgresRolePolicyRepo;
use steward_domain::{Role, TenantRolePolicy, ID};

/// Church specific overrides of the default role policies
#[async_trait::async_trait]
pub trait IRolePolicyRepo: Send + Sync {
    /// Inserts or replaces the override for the church and `Role`
    async fn upsert(&self, policy: &TenantRolePolicy) -> anyhow::Result<()>;
    async fn find(&self, church_id: &ID, role: Role) -> Option<TenantRolePolicy>;
}
