use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage, HttpResponse,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use std::{
    rc::Rc,
    task::{Context, Poll},
};

use crate::{
    constants::{SESSION_COOKIE, SIGN_IN_PATH},
    entities::token::Claims,
    errors::AuthError,
    repositories::token::TokenServiceRepository,
    AppState,
};

/// Attaches the caller's claims to the request and sends anonymous callers
/// of protected routes to the sign-in page.
pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let is_public = is_public_route(req.path(), req.method().as_str());

            match get_valid_claims(&req) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                }
                Err(AuthError::MissingJwtService) => {
                    tracing::error!("AppState missing in auth middleware");
                    return Ok(req.into_response(HttpResponse::InternalServerError().json(
                        serde_json::json!({"error": "Internal server error"}),
                    )));
                }
                Err(e) if !is_public => {
                    tracing::debug!("Redirecting {} to sign-in: {}", req.path(), e);
                    let location = sign_in_redirect(&req);
                    return Ok(req.into_response(
                        HttpResponse::Found()
                            .insert_header((header::LOCATION, location))
                            .finish(),
                    ));
                }
                Err(_) => {}
            }

            service.call(req).await
        })
    }
}

fn is_public_route(path: &str, method: &str) -> bool {
    if method == "OPTIONS" {
        return true;
    }

    matches!(
        path,
        "/" | "/health" | "/sign-in" | "/sign-out" | "/talent/submit-feedback"
    )
}

/// Bearer header first, then the session cookie.
pub fn extract_token(req: &ServiceRequest) -> Option<String> {
    let from_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        });

    from_header.or_else(|| {
        req.cookie(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    })
}

fn get_valid_claims(req: &ServiceRequest) -> Result<Claims, AuthError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or(AuthError::MissingJwtService)?;

    let token = extract_token(req).ok_or(AuthError::MissingCredentials)?;
    let decoded = state.auth_handler.token_service.decode_jwt(&token)?;
    Ok(decoded.claims)
}

/// `/sign-in?next=<path[?query]>` with the slashes of `next` left readable.
pub fn sign_in_location(path_and_query: &str) -> String {
    let next = urlencoding::encode(path_and_query).replace("%2F", "/");
    format!("{SIGN_IN_PATH}?next={next}")
}

fn sign_in_redirect(req: &ServiceRequest) -> String {
    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| req.path());
    sign_in_location(path_and_query)
}
