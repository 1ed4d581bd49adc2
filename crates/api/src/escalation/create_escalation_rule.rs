use crate::error::StewardError;
use crate::shared::{
    auth::{protect_route, Permission},
    usecase::{execute_with_policy, PermissionBoundary, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use steward_api_structs::create_escalation_rule::*;
use steward_domain::{EscalationRule, Priority, ReminderType, Role, ID, MAX_ESCALATE_AFTER_MINUTES};
use steward_infra::StewardContext;

pub async fn create_escalation_rule_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<StewardContext>,
) -> Result<HttpResponse, StewardError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = CreateEscalationRuleUseCase {
        church_id: user.church_id,
        source_role: body.source_role,
        escalate_after_minutes: body.escalate_after_minutes,
        reminder_type: body.reminder_type,
        priority: body.priority,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|rule| HttpResponse::Created().json(APIResponse::new(rule)))
        .map_err(StewardError::from)
}

#[derive(Debug)]
pub struct CreateEscalationRuleUseCase {
    pub church_id: ID,
    pub source_role: Role,
    pub escalate_after_minutes: i64,
    pub reminder_type: Option<ReminderType>,
    pub priority: Option<Priority>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidDelay(i64),
    StorageError,
}

impl From<UseCaseError> for StewardError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidDelay(minutes) => Self::BadClientData(format!(
                "Escalation delay must be between 1 and {} minutes, got {}",
                MAX_ESCALATE_AFTER_MINUTES, minutes
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateEscalationRuleUseCase {
    type Response = EscalationRule;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateEscalationRule";

    async fn execute(&mut self, ctx: &StewardContext) -> Result<Self::Response, Self::Error> {
        if self.escalate_after_minutes <= 0
            || self.escalate_after_minutes > MAX_ESCALATE_AFTER_MINUTES
        {
            return Err(UseCaseError::InvalidDelay(self.escalate_after_minutes));
        }

        let rule = EscalationRule {
            id: Default::default(),
            church_id: self.church_id.clone(),
            source_role: self.source_role,
            escalate_after_minutes: self.escalate_after_minutes,
            reminder_type: self.reminder_type,
            priority: self.priority,
            active: true,
            created: ctx.sys.get_timestamp_millis(),
        };

        ctx.repos
            .escalation_rules
            .insert(&rule)
            .await
            .map(|_| rule)
            .map_err(|_| UseCaseError::StorageError)
    }
}

impl PermissionBoundary for CreateEscalationRuleUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::ManageEscalationRules]
    }
}
