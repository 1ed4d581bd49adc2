use crate::{APIResponse, BaseClient, ID};
use reqwest::StatusCode;
use std::sync::Arc;
use steward_api_structs::*;
use steward_domain::EscalationStatus;

#[derive(Clone)]
pub struct EscalationClient {
    base: Arc<BaseClient>,
}

pub type CreateEscalationRuleInput = create_escalation_rule::RequestBody;

impl EscalationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Escalations assigned to the signed in member
    pub async fn list(&self) -> APIResponse<get_escalations::APIResponse> {
        self.base.get("escalations".into(), StatusCode::OK).await
    }

    pub async fn update(
        &self,
        escalation_id: ID,
        status: EscalationStatus,
    ) -> APIResponse<update_escalation::APIResponse> {
        let body = update_escalation::RequestBody { status };
        self.base
            .put(body, format!("escalations/{}", escalation_id), StatusCode::OK)
            .await
    }

    pub async fn create_rule(
        &self,
        input: CreateEscalationRuleInput,
    ) -> APIResponse<create_escalation_rule::APIResponse> {
        self.base
            .post(input, "escalation-rules".into(), StatusCode::CREATED)
            .await
    }

    pub async fn rules(&self) -> APIResponse<get_escalation_rules::APIResponse> {
        self.base
            .get("escalation-rules".into(), StatusCode::OK)
            .await
    }
}
