use super::entity::ID;
use serde::{Deserialize, Serialize};

/// Reference to a record owned by another part of the application,
/// e.g. the booking a `Reminder` was created for.
///
/// The referenced record is never validated here, that is the
/// responsibility of whoever produced the reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRef<T> {
    #[serde(rename = "type")]
    pub entity_type: T,
    pub id: ID,
}

impl<T> EntityRef<T> {
    pub fn new(entity_type: T, id: ID) -> Self {
        Self { entity_type, id }
    }
}
