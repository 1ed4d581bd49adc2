mod policy;
mod route_guards;

pub use policy::{Permission, Policy};
pub use route_guards::{create_user_token, protect_admin_route, protect_route};
