//! Repository for the `hero_applications` table.

use sqlx::PgPool;
use superfix_core::types::DbId;

use crate::models::application::{CreateHeroApplication, HeroApplication};

const COLUMNS: &str = "id, name, email, phone, category, created_at";

pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Persist a pending application.
    pub async fn create(
        pool: &PgPool,
        input: &CreateHeroApplication,
    ) -> Result<HeroApplication, sqlx::Error> {
        let query = format!(
            "INSERT INTO hero_applications (name, email, phone, category)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HeroApplication>(&query)
            .bind(input.name.trim())
            .bind(input.email.trim())
            .bind(input.phone.trim())
            .bind(input.category.label())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<HeroApplication>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM hero_applications WHERE id = $1");
        sqlx::query_as::<_, HeroApplication>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All pending applications, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<HeroApplication>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM hero_applications ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, HeroApplication>(&query)
            .fetch_all(pool)
            .await
    }

    /// Discard an application. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM hero_applications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
