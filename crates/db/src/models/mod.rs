//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches, where the table has one
//!
//! Entities serialize in camelCase to match the web client.

pub mod admin;
pub mod application;
pub mod hero;
pub mod mission;
pub mod review;
