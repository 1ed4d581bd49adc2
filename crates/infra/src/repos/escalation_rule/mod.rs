mod inmemory;
mod postgres;

pub use inmemory::InMemoryEscalationRuleRepo;
pub use postgres::PostgresEscalationRuleRepo;
use steward_domain::{EscalationRule, ID};

#[async_trait::async_trait]
pub trait IEscalationRuleRepo: Send + Sync {
    async fn insert(&self, rule: &EscalationRule) -> anyhow::Result<()>;
    async fn find_by_church(&self, church_id: &ID) -> anyhow::Result<Vec<EscalationRule>>;
}
