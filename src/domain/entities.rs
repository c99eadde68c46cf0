pub mod bounty;
pub mod feedback;
pub mod person;
pub mod portfolio;
pub mod product;
pub mod skill;
pub mod token;
pub mod user;
