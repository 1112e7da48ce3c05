pub mod applications;
pub mod auth;
pub mod heroes;
pub mod missions;
pub mod reviews;
