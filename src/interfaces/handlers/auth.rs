use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    get,
    http::header,
    post, web, Either, HttpRequest, HttpResponse, Responder, ResponseError,
};
use tracing::instrument;

use crate::{
    constants::{SESSION_COOKIE, SIGN_IN_PATH},
    entities::user::{SignInQuery, SignInRequest},
    errors::AuthError,
    limiter::rate_limiter::RateDecision,
    utils::get_client_ip::get_client_ip,
    AppState,
};

/// Only same-site absolute paths are followed after sign-in.
fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => "/",
    }
}

#[get("/sign-in")]
pub async fn sign_in_page(query: web::Query<SignInQuery>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Sign in required",
        "next": query.next,
    }))
}

#[post("/sign-in")]
#[instrument(skip(req, state, body))]
pub async fn sign_in(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Either<web::Form<SignInRequest>, web::Json<SignInRequest>>,
) -> impl Responder {
    let client_ip = get_client_ip(&req, false);
    if let RateDecision::Limited { retry_after_secs } = state.rate_limiter.check(&client_ip) {
        tracing::warn!("Sign-in rate limit hit for {}", client_ip);
        return AuthError::RateLimited(retry_after_secs).error_response();
    }

    match body {
        Either::Left(form) => {
            let request = form.into_inner();
            match state.auth_handler.sign_in(&request).await {
                Ok(auth) => {
                    let max_age = state.auth_handler.token_service.access_expiration().num_minutes();
                    let cookie = Cookie::build(SESSION_COOKIE, auth.access_token)
                        .path("/")
                        .http_only(true)
                        .same_site(SameSite::Lax)
                        .secure(state.config.is_production())
                        .max_age(CookieDuration::minutes(max_age))
                        .finish();

                    HttpResponse::Found()
                        .cookie(cookie)
                        .insert_header((header::LOCATION, safe_next(request.next.as_deref())))
                        .finish()
                }
                Err(e) => e.error_response(),
            }
        }
        Either::Right(json) => match state.auth_handler.sign_in(&json).await {
            Ok(auth) => HttpResponse::Ok().json(auth),
            Err(e) => e.error_response(),
        },
    }
}

#[post("/sign-out")]
pub async fn sign_out() -> impl Responder {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();

    HttpResponse::Found()
        .cookie(cookie)
        .insert_header((header::LOCATION, SIGN_IN_PATH))
        .finish()
}
