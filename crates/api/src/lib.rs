//! Superfix API server library.
//!
//! Exposes the building blocks (config, state, error handling, auth, routes,
//! notification dispatch) so integration tests and the binary entrypoint can
//! both assemble the same application.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod notifications;
pub mod response;
pub mod routes;
pub mod state;
