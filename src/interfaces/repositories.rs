pub mod feedback;
pub mod person;
pub mod sqlx_repo;
pub mod talent;
pub mod token;
pub mod user;
