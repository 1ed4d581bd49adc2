use crate::error::StewardError;
use crate::shared::{
    auth::{protect_route, Permission},
    role_policies::effective_role_policy,
    usecase::{execute_with_policy, PermissionBoundary, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use steward_api_structs::create_reminder::*;
use steward_domain::{
    calculate_trigger_times, EntityRef, Priority, Reminder, ReminderEntityType,
    ReminderSchedule, ReminderStatus, ReminderType, ID,
};
use steward_infra::StewardContext;
use tracing::info;

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<StewardContext>,
) -> Result<HttpResponse, StewardError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateReminderUseCase {
        church_id: user.church_id.clone(),
        user_id: body.user_id.unwrap_or_else(|| user.id.clone()),
        created_by: user.id,
        title: body.title,
        description: body.description,
        priority: body.priority.unwrap_or_default(),
        due_ts: body.due_ts,
        reminder_type: body.reminder_type.unwrap_or_default(),
        related_entity: body.related_entity,
        parent_reminder_id: body.parent_reminder_id,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|(reminder, schedules)| {
            HttpResponse::Created().json(APIResponse::new(reminder, schedules))
        })
        .map_err(StewardError::from)
}

/// Creates a `Reminder` together with the `ReminderSchedule`s the
/// `RolePolicy` of its owner gives it
#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub church_id: ID,
    /// Owner
    pub user_id: ID,
    pub created_by: ID,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_ts: Option<i64>,
    pub reminder_type: ReminderType,
    pub related_entity: Option<EntityRef<ReminderEntityType>>,
    pub parent_reminder_id: Option<ID>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidTitle,
    MissingDueTime,
    OwnerNotFound(ID),
    ParentNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for StewardError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidTitle => {
                Self::BadClientData("A reminder needs a non empty title".into())
            }
            UseCaseError::MissingDueTime => {
                Self::BadClientData("A reminder needs a due time".into())
            }
            UseCaseError::OwnerNotFound(id) => {
                Self::NotFound(format!("A user with id: {}, was not found.", id))
            }
            UseCaseError::ParentNotFound(id) => {
                Self::NotFound(format!("A reminder with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = (Reminder, Vec<ReminderSchedule>);
    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &StewardContext) -> Result<Self::Response, Self::Error> {
        if self.title.trim().is_empty() {
            return Err(UseCaseError::InvalidTitle);
        }
        let due_ts = self.due_ts.ok_or(UseCaseError::MissingDueTime)?;

        let owner = match ctx.repos.users.find(&self.user_id).await {
            Some(owner) if owner.church_id == self.church_id => owner,
            _ => return Err(UseCaseError::OwnerNotFound(self.user_id.clone())),
        };
        if let Some(parent_id) = &self.parent_reminder_id {
            match ctx.repos.reminders.find(parent_id).await {
                Some(parent) if parent.church_id == self.church_id => {}
                _ => return Err(UseCaseError::ParentNotFound(parent_id.clone())),
            }
        }

        let now = ctx.sys.get_timestamp_millis();
        let reminder = Reminder {
            id: Default::default(),
            church_id: self.church_id.clone(),
            user_id: owner.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            due_ts,
            reminder_type: self.reminder_type,
            related_entity: self.related_entity.clone(),
            parent_reminder_id: self.parent_reminder_id.clone(),
            acknowledged: false,
            acknowledged_at: None,
            acknowledged_action: None,
            snoozed_until: None,
            snooze_count: 0,
            escalated: false,
            escalated_at: None,
            escalated_to: None,
            status: ReminderStatus::Active,
            created_by: self.created_by.clone(),
            created: now,
            updated: now,
            version: 0,
        };

        let (policy, _) = effective_role_policy(&self.church_id, owner.role, ctx).await;
        let schedules = calculate_trigger_times(due_ts, &policy, now)
            .into_iter()
            .map(|(offset, trigger_ts)| {
                ReminderSchedule::new(&reminder.id, trigger_ts, Some(offset), now)
            })
            .collect::<Vec<_>>();
        if schedules.is_empty() {
            info!(
                "Reminder {} due at {} has no future trigger points",
                reminder.id, due_ts
            );
        }

        ctx.repos
            .reminders
            .insert(&reminder, &schedules)
            .await
            .map(|_| (reminder, schedules))
            .map_err(|_| UseCaseError::StorageError)
    }
}

impl PermissionBoundary for CreateReminderUseCase {
    fn permissions(&self) -> Vec<Permission> {
        if self.user_id == self.created_by {
            vec![Permission::CreateReminder]
        } else {
            vec![Permission::CreateReminder, Permission::AssignReminder]
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::test_helpers::{create_reminder, setup_user, HOUR};
    use std::sync::Arc;
    use steward_domain::{Role, RolePolicy, TenantRolePolicy};
    use steward_infra::StaticTimeSys;

    #[actix_web::test]
    async fn worker_reminder_due_in_two_hours_gets_one_schedule() {
        let mut ctx = StewardContext::create_inmemory();
        let now = 1_700_000_000_000;
        ctx.sys = Arc::new(StaticTimeSys::new(now));
        let worker = setup_user(&ctx, &ID::new(), Role::Worker).await;

        let (reminder, schedules) = create_reminder(&worker, now + 2 * HOUR)
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(reminder.status, ReminderStatus::Active);
        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0].trigger_ts, now + HOUR);
        assert_eq!(
            schedules[0].offset.as_ref().map(|o| o.token()),
            Some("1h")
        );
        let stored = ctx.repos.reminders.find_schedules(&reminder.id).await.unwrap();
        assert_eq!(stored, schedules);
    }

    #[actix_web::test]
    async fn reminder_close_to_its_due_time_has_no_schedules() {
        let mut ctx = StewardContext::create_inmemory();
        let now = 1_700_000_000_000;
        ctx.sys = Arc::new(StaticTimeSys::new(now));
        let pastor = setup_user(&ctx, &ID::new(), Role::Pastor).await;

        let (reminder, schedules) = create_reminder(&pastor, now + 10 * 60 * 1000)
            .execute(&ctx)
            .await
            .unwrap();

        assert!(schedules.is_empty());
        assert!(ctx.repos.reminders.find(&reminder.id).await.is_some());
    }

    #[actix_web::test]
    async fn uses_the_church_override_of_the_role_policy() {
        let mut ctx = StewardContext::create_inmemory();
        let now = 1_700_000_000_000;
        ctx.sys = Arc::new(StaticTimeSys::new(now));
        let member = setup_user(&ctx, &ID::new(), Role::Member).await;
        ctx.repos
            .role_policies
            .upsert(&TenantRolePolicy {
                church_id: member.church_id.clone(),
                role: Role::Member,
                policy: RolePolicy::new(&["3h", "30m"], None, 2),
                updated: now,
            })
            .await
            .unwrap();

        let (_, schedules) = create_reminder(&member, now + 4 * HOUR)
            .execute(&ctx)
            .await
            .unwrap();
        let trigger_times = schedules.iter().map(|s| s.trigger_ts).collect::<Vec<_>>();
        assert_eq!(
            trigger_times,
            vec![now + HOUR, now + 3 * HOUR + 30 * 60 * 1000]
        );
    }

    #[actix_web::test]
    async fn rejects_invalid_input() {
        let ctx = StewardContext::create_inmemory();
        let owner = setup_user(&ctx, &ID::new(), Role::Worker).await;

        let mut usecase = create_reminder(&owner, HOUR);
        usecase.title = "   ".into();
        assert_eq!(usecase.execute(&ctx).await, Err(UseCaseError::InvalidTitle));

        let mut usecase = create_reminder(&owner, HOUR);
        usecase.due_ts = None;
        assert_eq!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::MissingDueTime)
        );

        let parent_id = ID::new();
        let mut usecase = create_reminder(&owner, HOUR);
        usecase.parent_reminder_id = Some(parent_id.clone());
        assert_eq!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::ParentNotFound(parent_id))
        );
    }

    #[actix_web::test]
    async fn owner_must_belong_to_the_church() {
        let ctx = StewardContext::create_inmemory();
        let creator = setup_user(&ctx, &ID::new(), Role::Admin).await;
        let outsider = setup_user(&ctx, &ID::new(), Role::Worker).await;

        let mut usecase = create_reminder(&creator, HOUR);
        usecase.user_id = outsider.id.clone();
        assert_eq!(
            usecase.permissions(),
            vec![Permission::CreateReminder, Permission::AssignReminder]
        );
        assert_eq!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::OwnerNotFound(outsider.id.clone()))
        );
    }
}
