use actix_web::web;

use crate::handlers::{home::home, system::health_check};

mod auth;
mod talent;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home).service(health_check);

    cfg.configure(auth::config_routes);
    cfg.service(web::scope("/talent").configure(talent::config_routes));
}
