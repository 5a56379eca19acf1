pub mod advance_due_reminder;
mod create_reminder;
mod delete_reminder;
mod delete_reminders;
mod get_reminder;
mod get_reminders;
mod get_upcoming_reminders;
mod reminder_input;
pub mod sweep_overdue_reminders;
#[cfg(test)]
mod test_repos;
mod update_reminder;

use actix_web::web;
use create_reminder::create_reminder_controller;
use delete_reminder::delete_reminder_controller;
use delete_reminders::delete_reminders_controller;
use get_reminder::get_reminder_controller;
use get_reminders::get_reminders_controller;
use get_upcoming_reminders::get_upcoming_reminders_controller;
use update_reminder::update_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders", web::post().to(create_reminder_controller));
    cfg.route("/reminders", web::get().to(get_reminders_controller));
    cfg.route("/reminders", web::delete().to(delete_reminders_controller));

    // Has to be registered before the id route
    cfg.route(
        "/reminders/upcoming",
        web::get().to(get_upcoming_reminders_controller),
    );

    cfg.route(
        "/reminders/{reminder_id}",
        web::get().to(get_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::put().to(update_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::delete().to(delete_reminder_controller),
    );
}
