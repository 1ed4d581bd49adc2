mod get_role_policy;
mod set_role_policy;

use actix_web::web;
use get_role_policy::get_role_policy_controller;
use set_role_policy::set_role_policy_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/role-policies/{role}",
        web::get().to(get_role_policy_controller),
    );
    cfg.route(
        "/role-policies/{role}",
        web::put().to(set_role_policy_controller),
    );
}
