use actix_web::{get, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::skill::{SelectedSkillsQuery, SkillAndExpertiseQuery},
    use_cases::extractors::CurrentUser,
    AppState,
};

#[get("/get-skills")]
#[instrument(skip(state))]
pub async fn get_skills(state: web::Data<AppState>) -> impl Responder {
    match state.talent_handler.get_skills().await {
        Ok(skills) => HttpResponse::Ok().json(skills),
        Err(e) => e.to_http_response(),
    }
}

#[get("/get-current-skills")]
#[instrument(skip(state, caller), fields(user = %caller.username))]
pub async fn get_current_skills(state: web::Data<AppState>, caller: CurrentUser) -> impl Responder {
    match state.talent_handler.get_current_skills(&caller).await {
        Ok(ids) => HttpResponse::Ok().json(ids),
        Err(e) => e.to_http_response(),
    }
}

#[get("/get-expertise")]
#[instrument(skip(state))]
pub async fn get_expertise(
    state: web::Data<AppState>,
    query: web::Query<SelectedSkillsQuery>,
) -> impl Responder {
    match state
        .talent_handler
        .get_expertise(query.selected_skills.as_deref())
        .await
    {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.to_http_response(),
    }
}

#[get("/get-current-expertise")]
#[instrument(skip(state, caller), fields(user = %caller.username))]
pub async fn get_current_expertise(state: web::Data<AppState>, caller: CurrentUser) -> impl Responder {
    match state.talent_handler.get_current_expertise(&caller).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.to_http_response(),
    }
}

#[get("/list-skill-and-expertise")]
#[instrument(skip(state))]
pub async fn list_skill_and_expertise(
    state: web::Data<AppState>,
    query: web::Query<SkillAndExpertiseQuery>,
) -> impl Responder {
    match state
        .talent_handler
        .list_skill_and_expertise(query.skills.as_deref(), query.expertise.as_deref())
        .await
    {
        Ok(pairs) => HttpResponse::Ok().json(pairs),
        Err(e) => e.to_http_response(),
    }
}
