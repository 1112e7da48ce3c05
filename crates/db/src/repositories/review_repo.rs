//! Repository for the `reviews` table.

use sqlx::PgPool;
use superfix_core::trust::review_trust_bonus;
use superfix_core::types::DbId;

use crate::models::review::{CreateReview, Review};

const COLUMNS: &str = "id, hero_id, client_name, rating, comment, created_at";

pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a review and apply its trust bonus to the hero atomically.
    ///
    /// The hero row is updated first (a no-op increment for ratings below 5),
    /// which both locks it and confirms it exists. Returns `None`, writing
    /// nothing, when the hero does not exist.
    pub async fn create(pool: &PgPool, input: &CreateReview) -> Result<Option<Review>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let hero = sqlx::query_scalar::<_, DbId>(
            "UPDATE heroes SET trust_factor = trust_factor + $2 WHERE id = $1 RETURNING id",
        )
        .bind(input.hero_id)
        .bind(review_trust_bonus(input.rating))
        .fetch_optional(&mut *tx)
        .await?;
        if hero.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO reviews (hero_id, client_name, rating, comment)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let review = sqlx::query_as::<_, Review>(&query)
            .bind(input.hero_id)
            .bind(input.client_name.trim())
            .bind(input.rating)
            .bind(&input.comment)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(review))
    }

    /// Reviews for one hero, newest first.
    pub async fn list_by_hero(pool: &PgPool, hero_id: DbId) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews WHERE hero_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(hero_id)
            .fetch_all(pool)
            .await
    }

    /// Every review, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Review>(&query).fetch_all(pool).await
    }
}
