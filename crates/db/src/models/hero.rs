//! Hero entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use superfix_core::category::JobCategory;
use superfix_core::directory::DirectoryEntry;
use superfix_core::rating::{average_rating, star_count};
use superfix_core::trust::hero_level;
use superfix_core::types::{DbId, Timestamp};

use crate::models::review::Review;

/// A hero row from the `heroes` table.
///
/// `password_hash` is never serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub id: DbId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub alias: String,
    pub real_name: Option<String>,
    #[sqlx(try_from = "String")]
    pub category: JobCategory,
    pub description: Option<String>,
    pub hourly_rate: i32,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub powers: Option<String>,
    pub avatar_url: Option<String>,
    pub video_url: Option<String>,
    pub trust_factor: i64,
    pub missions_completed: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a hero. The password must already be hashed.
///
/// `trust_factor` defaults to 50 when `None`; `missions_completed` always
/// starts at 0.
#[derive(Debug, Clone)]
pub struct CreateHero {
    pub username: String,
    pub password_hash: String,
    pub alias: String,
    pub real_name: Option<String>,
    pub category: JobCategory,
    pub description: Option<String>,
    pub hourly_rate: Option<i32>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub powers: Option<String>,
    pub avatar_url: Option<String>,
    pub video_url: Option<String>,
    pub trust_factor: Option<i64>,
}

/// DTO for patching a hero. Only `Some` fields are written.
///
/// `missions_completed` is deliberately absent: it only moves on mission
/// completion.
#[derive(Debug, Clone, Default)]
pub struct UpdateHero {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub alias: Option<String>,
    pub real_name: Option<String>,
    pub category: Option<JobCategory>,
    pub description: Option<String>,
    pub hourly_rate: Option<i32>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub powers: Option<String>,
    pub avatar_url: Option<String>,
    pub video_url: Option<String>,
    pub trust_factor: Option<i64>,
}

/// A hero with reviews attached and the derived figures the directory shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroProfile {
    #[serde(flatten)]
    pub hero: Hero,
    pub reviews: Vec<Review>,
    pub average_rating: f64,
    pub stars: u8,
    pub level: i32,
}

impl HeroProfile {
    pub fn new(hero: Hero, reviews: Vec<Review>) -> Self {
        let average = average_rating(reviews.iter().map(|r| r.rating));
        Self {
            level: hero_level(hero.missions_completed),
            stars: star_count(average),
            average_rating: average,
            hero,
            reviews,
        }
    }
}

impl DirectoryEntry for HeroProfile {
    fn alias(&self) -> &str {
        &self.hero.alias
    }

    fn real_name(&self) -> Option<&str> {
        self.hero.real_name.as_deref()
    }

    fn category_label(&self) -> &str {
        self.hero.category.label()
    }

    fn trust_factor(&self) -> i64 {
        self.hero.trust_factor
    }
}
