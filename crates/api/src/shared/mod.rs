pub mod auth;
pub mod role_policies;
pub mod usecase;
