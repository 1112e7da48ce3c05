//! Admin principal model.

use sqlx::FromRow;
use superfix_core::types::{DbId, Timestamp};

/// An admin row from the `admins` table. Never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting an admin. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct CreateAdmin {
    pub username: String,
    pub password_hash: String,
}
