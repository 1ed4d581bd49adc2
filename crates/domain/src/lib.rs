#[macro_use]
mod shared;
mod alert;
mod escalation;
mod feed;
mod notification;
mod offset;
mod policy;
mod reminder;
mod trigger;
mod user;

pub use alert::{AlertEntityType, AlertSeverity, AlertType, DashboardAlert};
pub use escalation::{
    EscalationLog, EscalationRule, EscalationStateError, EscalationStatus,
    MAX_ESCALATE_AFTER_MINUTES,
};
pub use feed::AlertFeed;
pub use notification::{Notification, NotificationChannel, NotificationType};
pub use offset::{parse_offset, InvalidOffsetError, ReminderOffset};
pub use policy::{Role, RolePolicies, RolePolicy, TenantRolePolicy};
pub use reminder::{
    AcknowledgeAction, Priority, Reminder, ReminderEntityType, ReminderSchedule,
    ReminderStateError, ReminderStatus, ReminderType,
};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::entity_ref::EntityRef;
pub use shared::text_enum::UnknownVariantError;
pub use trigger::calculate_trigger_times;
pub use user::User;
