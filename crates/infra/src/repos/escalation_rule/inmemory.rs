use super::IEscalationRuleRepo;
use crate::repos::shared::inmemory_repo::*;
use steward_domain::{EscalationRule, ID};

pub struct InMemoryEscalationRuleRepo {
    rules: std::sync::Mutex<Vec<EscalationRule>>,
}

impl InMemoryEscalationRuleRepo {
    pub fn new() -> Self {
        Self {
            rules: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IEscalationRuleRepo for InMemoryEscalationRuleRepo {
    async fn insert(&self, rule: &EscalationRule) -> anyhow::Result<()> {
        insert(rule, &self.rules);
        Ok(())
    }

    async fn find_by_church(&self, church_id: &ID) -> anyhow::Result<Vec<EscalationRule>> {
        let mut rules = find_by(&self.rules, |r| r.church_id == *church_id);
        rules.sort_by_key(|r| r.created);
        Ok(rules)
    }
}
