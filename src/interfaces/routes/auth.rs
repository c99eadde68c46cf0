use actix_web::web;

use crate::handlers::auth;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::sign_in_page)
        .service(auth::sign_in)
        .service(auth::sign_out);
}
