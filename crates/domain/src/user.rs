use crate::{
    policy::Role,
    shared::entity::{Entity, ID},
};

/// A member of a church as far as reminders are concerned.
///
/// The member directory itself lives elsewhere, only the church and
/// the `Role` are needed here.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub church_id: ID,
    pub role: Role,
    pub created: i64,
}

impl User {
    pub fn new(church_id: ID, role: Role, now: i64) -> Self {
        Self {
            id: Default::default(),
            church_id,
            role,
            created: now,
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
