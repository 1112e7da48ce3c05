//! Superfix domain core.
//!
//! Pure business rules shared by the persistence and HTTP layers. Nothing in
//! this crate performs I/O.

pub mod category;
pub mod directory;
pub mod error;
pub mod mission;
pub mod rating;
pub mod roles;
pub mod trust;
pub mod types;
pub mod validation;
