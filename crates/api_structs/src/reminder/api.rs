use crate::dtos::{EscalationLogDTO, ReminderDTO, ReminderScheduleDTO};
use serde::{Deserialize, Serialize};
use steward_domain::{
    AcknowledgeAction, EntityRef, EscalationLog, Priority, Reminder, ReminderEntityType,
    ReminderSchedule, ReminderStatus, ReminderType, ID,
};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
        }
    }
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulesResponse {
    pub schedules: Vec<ReminderScheduleDTO>,
}

impl SchedulesResponse {
    pub fn new(schedules: Vec<ReminderSchedule>) -> Self {
        Self {
            schedules: schedules
                .into_iter()
                .map(ReminderScheduleDTO::new)
                .collect(),
        }
    }
}

#[derive(Deserialize, Serialize)]
pub struct ReminderPathParams {
    pub reminder_id: ID,
}

pub mod create_reminder {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// Owner of the `Reminder`, defaults to the caller
        #[serde(default)]
        pub user_id: Option<ID>,
        pub title: String,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub priority: Option<Priority>,
        pub due_ts: Option<i64>,
        #[serde(default)]
        pub reminder_type: Option<ReminderType>,
        #[serde(default)]
        pub related_entity: Option<EntityRef<ReminderEntityType>>,
        #[serde(default)]
        pub parent_reminder_id: Option<ID>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminder: ReminderDTO,
        pub schedules: Vec<ReminderScheduleDTO>,
    }

    impl APIResponse {
        pub fn new(reminder: Reminder, schedules: Vec<ReminderSchedule>) -> Self {
            Self {
                reminder: ReminderDTO::new(reminder),
                schedules: schedules
                    .into_iter()
                    .map(ReminderScheduleDTO::new)
                    .collect(),
            }
        }
    }
}

pub mod get_reminder {
    use super::*;

    pub type PathParams = ReminderPathParams;
    pub type APIResponse = ReminderResponse;
}

pub mod get_reminders {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    pub struct QueryParams {
        #[serde(default)]
        pub status: Option<ReminderStatus>,
    }

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>) -> Self {
            Self {
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}

pub mod get_reminder_schedules {
    use super::*;

    pub type PathParams = ReminderPathParams;
    pub type APIResponse = SchedulesResponse;
}

pub mod acknowledge_reminder {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub action: AcknowledgeAction,
        /// Millis to snooze for, required when the action is `snoozed`
        #[serde(default)]
        pub snooze_duration: Option<i64>,
    }

    pub type PathParams = ReminderPathParams;
    pub type APIResponse = ReminderResponse;
}

pub mod escalate_reminder {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub to_user_id: ID,
        #[serde(default)]
        pub reason: Option<String>,
    }

    pub type PathParams = ReminderPathParams;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminder: ReminderDTO,
        pub escalation: EscalationLogDTO,
    }

    impl APIResponse {
        pub fn new(reminder: Reminder, escalation: EscalationLog) -> Self {
            Self {
                reminder: ReminderDTO::new(reminder),
                escalation: EscalationLogDTO::new(escalation),
            }
        }
    }
}
