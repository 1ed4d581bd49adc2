pub mod create_user;
mod get_me;
mod issue_token;

use actix_web::web;
use create_user::create_user_controller;
use get_me::get_me_controller;
use issue_token::issue_token_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/admin/users", web::post().to(create_user_controller));
    cfg.route(
        "/admin/users/{user_id}/tokens",
        web::post().to(issue_token_controller),
    );
    cfg.route("/me", web::get().to(get_me_controller));
}
