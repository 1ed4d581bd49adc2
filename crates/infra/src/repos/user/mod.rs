mod inmemory;
mod postgres;

pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;
use steward_domain::{Role, User, ID};

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    async fn find_many(&self, user_ids: &[ID]) -> anyhow::Result<Vec<User>>;
    /// Members of the church holding the given `Role`, oldest first
    async fn find_by_role(&self, church_id: &ID, role: Role) -> anyhow::Result<Vec<User>>;
}
