use super::IRolePolicyRepo;
use std::sync::Mutex;
use steward_domain::{Role, TenantRolePolicy, ID};

pub struct InMemoryRolePolicyRepo {
    policies: Mutex<Vec<TenantRolePolicy>>,
}

impl InMemoryRolePolicyRepo {
    pub fn new() -> Self {
        Self {
            policies: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IRolePolicyRepo for InMemoryRolePolicyRepo {
    async fn upsert(&self, policy: &TenantRolePolicy) -> anyhow::Result<()> {
        let mut policies = self.policies.lock().unwrap();
        policies.retain(|p| !(p.church_id == policy.church_id && p.role == policy.role));
        policies.push(policy.clone());
        Ok(())
    }

    async fn find(&self, church_id: &ID, role: Role) -> Option<TenantRolePolicy> {
        let policies = self.policies.lock().unwrap();
        policies
            .iter()
            .find(|p| p.church_id == *church_id && p.role == role)
            .cloned()
    }
}
