use serde::{Deserialize, Serialize};
use steward_domain::{Role, User, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: ID,
    pub church_id: ID,
    pub role: Role,
    pub created: i64,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            church_id: user.church_id,
            role: user.role,
            created: user.created,
        }
    }
}
