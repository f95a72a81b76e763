mod create_reminder;
pub mod send_due_reminders;

use actix_web::web;
use create_reminder::create_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminder", web::post().to(create_reminder_controller));
}
