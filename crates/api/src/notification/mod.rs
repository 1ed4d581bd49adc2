pub mod create_notification;
mod dismiss_notification;
mod mark_notification_read;

use actix_web::web;
use create_notification::create_notification_controller;
use dismiss_notification::dismiss_notification_controller;
use mark_notification_read::mark_notification_read_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/notifications",
        web::post().to(create_notification_controller),
    );
    cfg.route(
        "/notifications/{notification_id}/read",
        web::put().to(mark_notification_read_controller),
    );
    cfg.route(
        "/notifications/{notification_id}/dismiss",
        web::put().to(dismiss_notification_controller),
    );
}
