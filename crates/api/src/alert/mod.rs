mod acknowledge_alert;
mod dismiss_alert;
mod get_alert_feed;
pub mod raise_alert;

use acknowledge_alert::acknowledge_alert_controller;
use actix_web::web;
use dismiss_alert::dismiss_alert_controller;
use get_alert_feed::get_alert_feed_controller;
use raise_alert::raise_alert_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/alerts", web::post().to(raise_alert_controller));
    cfg.route(
        "/alerts/{alert_id}/dismiss",
        web::put().to(dismiss_alert_controller),
    );
    cfg.route(
        "/alerts/{alert_id}/acknowledge",
        web::put().to(acknowledge_alert_controller),
    );
    cfg.route("/feed", web::get().to(get_alert_feed_controller));
}
