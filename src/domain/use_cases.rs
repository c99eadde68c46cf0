pub mod auth;
pub mod extractors;
pub mod feedback;
pub mod profile;
pub mod talent;
