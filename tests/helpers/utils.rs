use super::setup::TestApp;
use std::time::{SystemTime, UNIX_EPOCH};
use steward_sdk::{CreateUserInput, Role, StewardSDK, UserDTO, ID};

pub const HOUR: i64 = 1000 * 60 * 60;

pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

/// Registers a member in the church and returns a client signed in as them
pub async fn create_member(
    app: &TestApp,
    admin: &StewardSDK,
    church_id: &ID,
    role: Role,
) -> (UserDTO, StewardSDK) {
    let user = admin
        .user
        .create(CreateUserInput {
            church_id: church_id.clone(),
            role,
        })
        .await
        .expect("Expected to create member")
        .user;
    let token = admin
        .user
        .issue_token(user.id.clone(), None)
        .await
        .expect("Expected to issue token")
        .token;

    (user, StewardSDK::member(app.address.clone(), token))
}
