use std::{sync::Arc, time::Duration};

mod domain;
mod infrastructure;
mod interfaces;
pub mod constants;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;

pub use domain::{entities, use_cases};
pub use infrastructure::{auth, db, limiter, storage, utils};
pub use interfaces::{handlers, middlewares, repositories, routes};

use auth::jwt::JwtService;
use limiter::rate_limiter::RateLimiterStore;
use repositories::{
    feedback::FeedbackRepository,
    person::PersonRepository,
    sqlx_repo::{SqlxFeedbackRepo, SqlxPersonRepo, SqlxTalentRepo, SqlxUserRepo},
    talent::TalentRepository,
    user::UserRepository,
};
use settings::AppConfig;
use storage::media::MediaStorage;
use use_cases::{auth::AuthHandler, feedback::FeedbackHandler, profile::ProfileHandler, talent::TalentHandler};

const SIGN_IN_WINDOW: Duration = Duration::from_secs(60);
const LIMITER_BUCKET_TTL: Duration = Duration::from_secs(600);

pub type AppAuthHandler = AuthHandler<dyn UserRepository, JwtService>;
pub type AppTalentHandler = TalentHandler<dyn TalentRepository>;
pub type AppFeedbackHandler = FeedbackHandler<dyn FeedbackRepository, dyn PersonRepository>;
pub type AppProfileHandler = ProfileHandler<dyn PersonRepository, dyn TalentRepository, dyn FeedbackRepository>;

/// The storage backends the use cases run against.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub talent: Arc<dyn TalentRepository>,
    pub persons: Arc<dyn PersonRepository>,
    pub feedback: Arc<dyn FeedbackRepository>,
}

impl Repositories {
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Repositories {
            users: Arc::new(SqlxUserRepo::new(pool.clone())),
            talent: Arc::new(SqlxTalentRepo::new(pool.clone())),
            persons: Arc::new(SqlxPersonRepo::new(pool.clone())),
            feedback: Arc::new(SqlxFeedbackRepo::new(pool)),
        }
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub auth_handler: AppAuthHandler,
    pub talent_handler: AppTalentHandler,
    pub feedback_handler: AppFeedbackHandler,
    pub profile_handler: AppProfileHandler,
    pub rate_limiter: RateLimiterStore,
}

impl AppState {
    pub fn new(config: &AppConfig, pool: sqlx::PgPool) -> Self {
        Self::with_repositories(config, Repositories::postgres(pool))
    }

    pub fn with_repositories(config: &AppConfig, repos: Repositories) -> Self {
        let auth_handler = AuthHandler::new(repos.users, JwtService::new(config));
        let talent_handler = TalentHandler::new(repos.talent.clone());
        let feedback_handler = FeedbackHandler::new(repos.feedback.clone(), repos.persons.clone());
        let profile_handler = ProfileHandler::new(
            repos.persons,
            repos.talent,
            repos.feedback,
            MediaStorage::new(&config.media_root),
            config.media_url.clone(),
        );

        AppState {
            config: config.clone(),
            auth_handler,
            talent_handler,
            feedback_handler,
            profile_handler,
            rate_limiter: RateLimiterStore::new(config.sign_in_rate_limit, SIGN_IN_WINDOW, LIMITER_BUCKET_TTL),
        }
    }
}
