//! Mission (service request) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use superfix_core::mission::MissionStatus;
use superfix_core::types::{DbId, Timestamp};

use crate::models::hero::Hero;

/// A mission row from the `service_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub id: DbId,
    pub hero_id: DbId,
    pub client_name: String,
    pub client_phone: String,
    pub client_email: Option<String>,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub status: MissionStatus,
    pub photo_before: Option<String>,
    pub photo_after: Option<String>,
    #[serde(rename = "date")]
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the public hero-contact form. Missions always start `PENDING`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMission {
    pub hero_id: DbId,
    pub client_name: String,
    pub client_phone: String,
    pub client_email: Option<String>,
    pub description: String,
}

/// A mission with its assigned hero attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionWithHero {
    #[serde(flatten)]
    pub mission: Mission,
    pub hero: Option<Hero>,
}
