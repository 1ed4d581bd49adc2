use super::IEscalationLogRepo;
use crate::repos::shared::inmemory_repo::*;
use std::sync::Mutex;
use steward_domain::{EscalationLog, ID};

pub struct InMemoryEscalationLogRepo {
    logs: Mutex<Vec<EscalationLog>>,
}

impl InMemoryEscalationLogRepo {
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IEscalationLogRepo for InMemoryEscalationLogRepo {
    async fn insert_if_absent(&self, log: &EscalationLog) -> anyhow::Result<bool> {
        let mut logs = self.logs.lock().unwrap();
        let exists = logs
            .iter()
            .any(|l| l.reminder_id == log.reminder_id && l.escalated_to == log.escalated_to);
        if exists {
            return Ok(false);
        }
        logs.push(log.clone());
        Ok(true)
    }

    async fn save(&self, log: &EscalationLog) -> anyhow::Result<()> {
        if !save(log, &self.logs) {
            anyhow::bail!("Escalation log {} does not exist", log.id);
        }
        Ok(())
    }

    async fn delete(&self, log_id: &ID) -> anyhow::Result<()> {
        delete(log_id, &self.logs);
        Ok(())
    }

    async fn find(&self, log_id: &ID) -> Option<EscalationLog> {
        find(log_id, &self.logs)
    }

    async fn find_by_reminder(&self, reminder_id: &ID) -> anyhow::Result<Vec<EscalationLog>> {
        let mut logs = find_by(&self.logs, |l| l.reminder_id == *reminder_id);
        logs.sort_by_key(|l| l.created);
        Ok(logs)
    }

    async fn find_by_target(&self, user_id: &ID) -> anyhow::Result<Vec<EscalationLog>> {
        let mut logs = find_by(&self.logs, |l| l.escalated_to == *user_id);
        logs.sort_by_key(|l| std::cmp::Reverse(l.created));
        Ok(logs)
    }
}
