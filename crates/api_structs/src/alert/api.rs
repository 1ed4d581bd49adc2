use crate::dtos::DashboardAlertDTO;
use serde::{Deserialize, Serialize};
use steward_domain::{AlertEntityType, AlertSeverity, AlertType, DashboardAlert, EntityRef, ID};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertResponse {
    pub alert: DashboardAlertDTO,
}

impl AlertResponse {
    pub fn new(alert: DashboardAlert) -> Self {
        Self {
            alert: DashboardAlertDTO::new(alert),
        }
    }
}

#[derive(Deserialize, Serialize)]
pub struct AlertPathParams {
    pub alert_id: ID,
}

pub mod raise_alert {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub user_id: ID,
        #[serde(rename = "type")]
        pub alert_type: AlertType,
        #[serde(default)]
        pub related_entity: Option<EntityRef<AlertEntityType>>,
        #[serde(default)]
        pub severity: Option<AlertSeverity>,
        #[serde(default)]
        pub message: Option<String>,
    }

    pub type APIResponse = AlertResponse;
}

pub mod dismiss_alert {
    use super::*;

    pub type PathParams = AlertPathParams;
    pub type APIResponse = AlertResponse;
}

pub mod acknowledge_alert {
    use super::*;

    pub type PathParams = AlertPathParams;
    pub type APIResponse = AlertResponse;
}

pub mod get_alert_feed {
    pub type APIResponse = crate::dtos::AlertFeedDTO;
}
