use actix_multipart::form::MultipartForm;
use actix_web::{delete, get, http::header, post, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{person::ProfileUpdateForm, portfolio::PhotoUpload},
    errors::AppError,
    use_cases::extractors::CurrentUser,
    utils::valid_uuid::valid_uuid,
    AppState,
};

#[get("/portfolio/{username}")]
#[instrument(skip(state, caller), fields(viewer = %caller.username))]
pub async fn portfolio(
    state: web::Data<AppState>,
    caller: CurrentUser,
    username: web::Path<String>,
) -> impl Responder {
    match state.profile_handler.portfolio(&caller, &username).await {
        Ok(context) => HttpResponse::Ok().json(context),
        Err(e) => e.to_http_response(),
    }
}

#[get("/profile/{user_id}")]
#[instrument(skip(state, caller), fields(user = %caller.username))]
pub async fn profile(
    state: web::Data<AppState>,
    caller: CurrentUser,
    user_id: web::Path<String>,
) -> impl Responder {
    let user_id = match valid_uuid(&user_id) {
        Ok(id) => id,
        Err(e) => return e.to_http_response(),
    };

    match state.profile_handler.profile(&caller, &user_id).await {
        Ok(context) => HttpResponse::Ok().json(context),
        Err(e) => e.to_http_response(),
    }
}

#[post("/profile/{user_id}")]
#[instrument(skip(state, caller, form), fields(user = %caller.username))]
pub async fn update_profile(
    state: web::Data<AppState>,
    caller: CurrentUser,
    user_id: web::Path<String>,
    form: web::Form<ProfileUpdateForm>,
) -> impl Responder {
    let user_id = match valid_uuid(&user_id) {
        Ok(id) => id,
        Err(e) => return e.to_http_response(),
    };

    match state
        .profile_handler
        .update_profile(&caller, &user_id, form.into_inner())
        .await
    {
        Ok(_) => HttpResponse::Found()
            .insert_header((header::LOCATION, format!("/talent/profile/{user_id}")))
            .finish(),
        Err(e) => e.to_http_response(),
    }
}

#[post("/profile/{user_id}/photo")]
#[instrument(skip(state, caller, upload), fields(user = %caller.username))]
pub async fn upload_photo(
    state: web::Data<AppState>,
    caller: CurrentUser,
    user_id: web::Path<String>,
    upload: Result<MultipartForm<PhotoUpload>, actix_web::Error>,
) -> impl Responder {
    let user_id = match valid_uuid(&user_id) {
        Ok(id) => id,
        Err(e) => return e.to_http_response(),
    };

    let upload = match upload {
        Ok(upload) => upload.into_inner(),
        Err(e) => {
            tracing::warn!("Rejected photo upload: {}", e);
            return AppError::field("photo", "Expected a multipart `photo` field of at most 5MB")
                .to_http_response();
        }
    };

    let bytes = match tokio::fs::read(upload.photo.file.path()).await {
        Ok(bytes) => bytes,
        Err(e) => return AppError::InternalError(format!("Failed to read upload: {e}")).to_http_response(),
    };

    match state.profile_handler.upload_photo(&caller, &user_id, &bytes).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.to_http_response(),
    }
}

#[delete("/profile/{user_id}/photo")]
#[instrument(skip(state, caller), fields(user = %caller.username))]
pub async fn remove_photo(
    state: web::Data<AppState>,
    caller: CurrentUser,
    user_id: web::Path<String>,
) -> impl Responder {
    let user_id = match valid_uuid(&user_id) {
        Ok(id) => id,
        Err(e) => return e.to_http_response(),
    };

    match state.profile_handler.remove_photo(&caller, &user_id).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.to_http_response(),
    }
}
