mod alert;
mod escalation;
mod notification;
mod reminder;
mod role_policy;
mod status;
mod user;

pub mod dtos {
    pub use crate::alert::dtos::*;
    pub use crate::escalation::dtos::*;
    pub use crate::notification::dtos::*;
    pub use crate::reminder::dtos::*;
    pub use crate::user::dtos::*;
}

pub use crate::alert::api::*;
pub use crate::escalation::api::*;
pub use crate::notification::api::*;
pub use crate::reminder::api::*;
pub use crate::role_policy::api::*;
pub use crate::status::api::*;
pub use crate::user::api::*;
