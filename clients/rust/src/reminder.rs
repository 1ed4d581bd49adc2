use crate::{APIResponse, BaseClient, ID};
use reqwest::StatusCode;
use std::sync::Arc;
use steward_api_structs::*;
use steward_domain::{AcknowledgeAction, ReminderStatus};

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub type CreateReminderInput = create_reminder::RequestBody;

pub struct AcknowledgeReminderInput {
    pub reminder_id: ID,
    pub action: AcknowledgeAction,
    pub snooze_duration: Option<i64>,
}

pub struct EscalateReminderInput {
    pub reminder_id: ID,
    pub to_user_id: ID,
    pub reason: Option<String>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateReminderInput,
    ) -> APIResponse<create_reminder::APIResponse> {
        self.base
            .post(input, "reminders".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, reminder_id: ID) -> APIResponse<get_reminder::APIResponse> {
        self.base
            .get(format!("reminders/{}", reminder_id), StatusCode::OK)
            .await
    }

    pub async fn list(
        &self,
        status: Option<ReminderStatus>,
    ) -> APIResponse<get_reminders::APIResponse> {
        let path = match status {
            Some(status) => format!("reminders?status={}", status),
            None => "reminders".into(),
        };
        self.base.get(path, StatusCode::OK).await
    }

    pub async fn schedules(
        &self,
        reminder_id: ID,
    ) -> APIResponse<get_reminder_schedules::APIResponse> {
        self.base
            .get(format!("reminders/{}/schedules", reminder_id), StatusCode::OK)
            .await
    }

    pub async fn acknowledge(
        &self,
        input: AcknowledgeReminderInput,
    ) -> APIResponse<acknowledge_reminder::APIResponse> {
        let body = acknowledge_reminder::RequestBody {
            action: input.action,
            snooze_duration: input.snooze_duration,
        };
        self.base
            .post(
                body,
                format!("reminders/{}/acknowledge", input.reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn escalate(
        &self,
        input: EscalateReminderInput,
    ) -> APIResponse<escalate_reminder::APIResponse> {
        let body = escalate_reminder::RequestBody {
            to_user_id: input.to_user_id,
            reason: input.reason,
        };
        self.base
            .post(
                body,
                format!("reminders/{}/escalate", input.reminder_id),
                StatusCode::OK,
            )
            .await
    }
}
