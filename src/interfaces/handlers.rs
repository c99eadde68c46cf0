pub mod auth;
pub mod feedback;
pub mod home;
pub mod portfolio;
pub mod system;
pub mod talent;
