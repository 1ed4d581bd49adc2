use serde::{Deserialize, Serialize};
use steward_domain::{
    EscalationLog, EscalationRule, EscalationStatus, Priority, ReminderType, Role, ID,
};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EscalationLogDTO {
    pub id: ID,
    pub reminder_id: ID,
    pub escalated_from: ID,
    pub escalated_to: ID,
    pub reason: Option<String>,
    pub status: EscalationStatus,
    pub resolved_at: Option<i64>,
    pub created: i64,
}

impl EscalationLogDTO {
    pub fn new(log: EscalationLog) -> Self {
        Self {
            id: log.id,
            reminder_id: log.reminder_id,
            escalated_from: log.escalated_from,
            escalated_to: log.escalated_to,
            reason: log.reason,
            status: log.status,
            resolved_at: log.resolved_at,
            created: log.created,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EscalationRuleDTO {
    pub id: ID,
    pub church_id: ID,
    pub source_role: Role,
    pub escalate_after_minutes: i64,
    pub reminder_type: Option<ReminderType>,
    pub priority: Option<Priority>,
    pub active: bool,
    pub created: i64,
}

impl EscalationRuleDTO {
    pub fn new(rule: EscalationRule) -> Self {
        Self {
            id: rule.id,
            church_id: rule.church_id,
            source_role: rule.source_role,
            escalate_after_minutes: rule.escalate_after_minutes,
            reminder_type: rule.reminder_type,
            priority: rule.priority,
            active: rule.active,
            created: rule.created,
        }
    }
}
