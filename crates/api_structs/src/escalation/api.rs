use crate::dtos::{EscalationLogDTO, EscalationRuleDTO};
use serde::{Deserialize, Serialize};
use steward_domain::{
    EscalationLog, EscalationRule, EscalationStatus, Priority, ReminderType, Role, ID,
};

pub mod get_escalations {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub escalations: Vec<EscalationLogDTO>,
    }

    impl APIResponse {
        pub fn new(escalations: Vec<EscalationLog>) -> Self {
            Self {
                escalations: escalations.into_iter().map(EscalationLogDTO::new).collect(),
            }
        }
    }
}

pub mod update_escalation {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct RequestBody {
        pub status: EscalationStatus,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub escalation_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub escalation: EscalationLogDTO,
    }

    impl APIResponse {
        pub fn new(escalation: EscalationLog) -> Self {
            Self {
                escalation: EscalationLogDTO::new(escalation),
            }
        }
    }
}

pub mod create_escalation_rule {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub source_role: Role,
        pub escalate_after_minutes: i64,
        #[serde(default)]
        pub reminder_type: Option<ReminderType>,
        #[serde(default)]
        pub priority: Option<Priority>,
    }

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub rule: EscalationRuleDTO,
    }

    impl APIResponse {
        pub fn new(rule: EscalationRule) -> Self {
            Self {
                rule: EscalationRuleDTO::new(rule),
            }
        }
    }
}

pub mod get_escalation_rules {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub rules: Vec<EscalationRuleDTO>,
    }

    impl APIResponse {
        pub fn new(rules: Vec<EscalationRule>) -> Self {
            Self {
                rules: rules.into_iter().map(EscalationRuleDTO::new).collect(),
            }
        }
    }
}
