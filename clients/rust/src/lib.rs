mod alert;
mod base;
mod escalation;
mod notification;
mod reminder;
mod role_policy;
mod status;
mod user;

use alert::AlertClient;
pub use alert::RaiseAlertInput;
pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use escalation::EscalationClient;
pub use escalation::CreateEscalationRuleInput;
use notification::NotificationClient;
pub use notification::CreateNotificationInput;
use reminder::ReminderClient;
pub use reminder::{AcknowledgeReminderInput, CreateReminderInput, EscalateReminderInput};
use role_policy::RolePolicyClient;
pub use role_policy::SetRolePolicyInput;
use status::StatusClient;
pub use steward_api_structs::dtos::*;
pub use steward_domain::{
    AcknowledgeAction, AlertEntityType, AlertSeverity, AlertType, EntityRef, EscalationStatus,
    NotificationChannel, NotificationType, Priority, ReminderEntityType, ReminderStatus,
    ReminderType, Role, RolePolicy, ID,
};
use std::sync::Arc;
use user::UserClient;
pub use user::CreateUserInput;

pub use reqwest::StatusCode;

/// Steward Server SDK
///
/// The SDK contains methods for interacting with the Steward server
/// API, either as the administrator holding the admin secret or as
/// a signed in member.
#[derive(Clone)]
pub struct StewardSDK {
    pub alert: AlertClient,
    pub escalation: EscalationClient,
    pub notification: NotificationClient,
    pub reminder: ReminderClient,
    pub role_policy: RolePolicyClient,
    pub status: StatusClient,
    pub user: UserClient,
}

impl StewardSDK {
    /// Client authenticated with the admin secret, used to create members
    /// and issue their session tokens
    pub fn admin<T: Into<String>>(address: String, admin_secret: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_admin_secret(admin_secret.into());
        Self::from_base(base)
    }

    /// Client acting as the member the session token was issued for
    pub fn member<T: Into<String>>(address: String, token: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_token(token.into());
        Self::from_base(base)
    }

    pub fn new(address: String) -> Self {
        Self::from_base(BaseClient::new(address))
    }

    fn from_base(base: BaseClient) -> Self {
        let base = Arc::new(base);
        let alert = AlertClient::new(base.clone());
        let escalation = EscalationClient::new(base.clone());
        let notification = NotificationClient::new(base.clone());
        let reminder = ReminderClient::new(base.clone());
        let role_policy = RolePolicyClient::new(base.clone());
        let status = StatusClient::new(base.clone());
        let user = UserClient::new(base);

        Self {
            alert,
            escalation,
            notification,
            reminder,
            role_policy,
            status,
            user,
        }
    }
}
