//! Authentication and authorization extractors.
//!
//! - [`auth::Session`] -- the principal behind a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- requires the `ADMIN` role.
//! - [`rbac::RequireHero`] -- requires the `HERO` role.

pub mod auth;
pub mod rbac;
