use actix_web::web;

use crate::handlers::{feedback, portfolio, talent};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(talent::get_skills)
        .service(talent::get_current_skills)
        .service(talent::get_expertise)
        .service(talent::get_current_expertise)
        .service(talent::list_skill_and_expertise)
        .service(feedback::submit_feedback_page)
        .service(feedback::submit_feedback)
        .service(portfolio::portfolio)
        .service(portfolio::profile)
        .service(portfolio::update_profile)
        .service(portfolio::upload_photo)
        .service(portfolio::remove_photo);
}
