mod acknowledge_reminder;
mod create_reminder;
mod escalate_reminder;
pub mod fire_due_reminders;
mod get_reminder;
mod get_reminder_schedules;
mod get_reminders;
mod subscribers;
pub mod sweep_overdue_reminders;

use acknowledge_reminder::acknowledge_reminder_controller;
use actix_web::web;
use create_reminder::create_reminder_controller;
use escalate_reminder::escalate_reminder_controller;
use get_reminder::get_reminder_controller;
use get_reminder_schedules::get_reminder_schedules_controller;
use get_reminders::get_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders", web::post().to(create_reminder_controller));
    cfg.route("/reminders", web::get().to(get_reminders_controller));
    cfg.route(
        "/reminders/{reminder_id}",
        web::get().to(get_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/schedules",
        web::get().to(get_reminder_schedules_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/acknowledge",
        web::post().to(acknowledge_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/escalate",
        web::post().to(escalate_reminder_controller),
    );
}
