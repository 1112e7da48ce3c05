//! Hero application model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use superfix_core::category::JobCategory;
use superfix_core::trust::DEFAULT_TRUST_FACTOR;
use superfix_core::types::{DbId, Timestamp};

/// A pending application from the `hero_applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroApplication {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[sqlx(try_from = "String")]
    pub category: JobCategory,
    #[serde(rename = "date")]
    pub created_at: Timestamp,
}

/// DTO for the public application form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHeroApplication {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub category: JobCategory,
}

/// Hero form pre-filled from an application, shown to the admin before the
/// recruitment is confirmed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruitDraft {
    pub application_id: DbId,
    pub alias: String,
    pub real_name: String,
    pub email: String,
    pub phone: String,
    pub category: JobCategory,
    pub trust_factor: i64,
}

impl From<&HeroApplication> for RecruitDraft {
    fn from(app: &HeroApplication) -> Self {
        Self {
            application_id: app.id,
            alias: app.name.clone(),
            real_name: app.name.clone(),
            email: app.email.clone(),
            phone: app.phone.clone(),
            category: app.category.clone(),
            trust_factor: DEFAULT_TRUST_FACTOR,
        }
    }
}
