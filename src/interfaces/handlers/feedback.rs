use actix_web::{get, http::header, post, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    constants::FEEDBACK_FAILURE_BODY,
    entities::feedback::FeedbackForm,
    middlewares::auth::sign_in_location,
    use_cases::{extractors::CurrentUser, feedback::FeedbackOutcome},
    AppState,
};

const SUBMIT_FEEDBACK_PATH: &str = "/talent/submit-feedback";

fn failure_response() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(FEEDBACK_FAILURE_BODY)
}

fn redirect(location: String) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Feedback is only ever posted; a plain GET gets the failure body.
#[get("/submit-feedback")]
pub async fn submit_feedback_page() -> impl Responder {
    failure_response()
}

#[post("/submit-feedback")]
#[instrument(skip(state, caller, form), fields(user = caller.as_ref().map(|c| c.username.as_str())))]
pub async fn submit_feedback(
    state: web::Data<AppState>,
    caller: Option<CurrentUser>,
    form: Result<web::Form<FeedbackForm>, actix_web::Error>,
) -> impl Responder {
    let form = match form {
        Ok(form) => form.into_inner(),
        Err(e) => {
            tracing::warn!("Unreadable feedback form: {}", e);
            return failure_response();
        }
    };

    match state
        .feedback_handler
        .submit_feedback(caller.as_ref(), form)
        .await
    {
        FeedbackOutcome::Created { recipient_username } => {
            redirect(format!("/talent/portfolio/{recipient_username}"))
        }
        FeedbackOutcome::SignInRequired => redirect(sign_in_location(SUBMIT_FEEDBACK_PATH)),
        FeedbackOutcome::Rejected(_) => failure_response(),
    }
}
