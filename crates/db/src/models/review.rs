//! Review entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use superfix_core::types::{DbId, Timestamp};

/// A review row from the `reviews` table. Immutable once written.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: DbId,
    pub hero_id: DbId,
    pub client_name: String,
    pub rating: i32,
    pub comment: String,
    #[serde(rename = "date")]
    pub created_at: Timestamp,
}

/// DTO for submitting a review.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReview {
    pub hero_id: DbId,
    pub client_name: String,
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}
