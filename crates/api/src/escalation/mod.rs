mod create_escalation_rule;
mod get_escalation_rules;
mod get_escalations;
mod update_escalation;

use actix_web::web;
use create_escalation_rule::create_escalation_rule_controller;
use get_escalation_rules::get_escalation_rules_controller;
use get_escalations::get_escalations_controller;
use update_escalation::update_escalation_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/escalations", web::get().to(get_escalations_controller));
    cfg.route(
        "/escalations/{escalation_id}",
        web::put().to(update_escalation_controller),
    );
    cfg.route(
        "/escalation-rules",
        web::post().to(create_escalation_rule_controller),
    );
    cfg.route(
        "/escalation-rules",
        web::get().to(get_escalation_rules_controller),
    );
}
