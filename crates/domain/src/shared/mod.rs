#[macro_use]
pub mod text_enum;
pub mod entity;
pub mod entity_ref;
