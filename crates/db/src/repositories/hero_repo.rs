//! Repository for the `heroes` table.

use std::collections::HashMap;

use sqlx::{PgExecutor, PgPool};
use superfix_core::types::DbId;

use crate::models::hero::{CreateHero, Hero, HeroProfile, UpdateHero};
use crate::models::review::Review;
use crate::repositories::ReviewRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password_hash, alias, real_name, category, description, \
     hourly_rate, phone, email, location, powers, avatar_url, video_url, trust_factor, \
     missions_completed, created_at, updated_at";

/// Provides CRUD operations for heroes plus the counter updates.
pub struct HeroRepo;

impl HeroRepo {
    /// Insert a new hero, returning the created row.
    ///
    /// `trust_factor` defaults to 50 and `hourly_rate` to 0.
    pub async fn create(pool: &PgPool, input: &CreateHero) -> Result<Hero, sqlx::Error> {
        Self::insert(pool, input).await
    }

    /// Consume an application and create the hero in a single transaction.
    ///
    /// Returns `None`, writing nothing, if the application no longer exists.
    pub async fn create_from_application(
        pool: &PgPool,
        application_id: DbId,
        input: &CreateHero,
    ) -> Result<Option<Hero>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let consumed = sqlx::query("DELETE FROM hero_applications WHERE id = $1")
            .bind(application_id)
            .execute(&mut *tx)
            .await?;
        if consumed.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let hero = Self::insert(&mut *tx, input).await?;

        tx.commit().await?;
        Ok(Some(hero))
    }

    async fn insert<'e, E>(executor: E, input: &CreateHero) -> Result<Hero, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO heroes
                (username, password_hash, alias, real_name, category, description, hourly_rate,
                 phone, email, location, powers, avatar_url, video_url, trust_factor,
                 missions_completed)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 0), $8, $9, $10, $11, $12, $13,
                     COALESCE($14, 50), 0)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Hero>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.alias)
            .bind(&input.real_name)
            .bind(input.category.label())
            .bind(&input.description)
            .bind(input.hourly_rate)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.location)
            .bind(&input.powers)
            .bind(&input.avatar_url)
            .bind(&input.video_url)
            .bind(input.trust_factor)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Hero>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM heroes WHERE id = $1");
        sqlx::query_as::<_, Hero>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Hero>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM heroes WHERE username = $1");
        sqlx::query_as::<_, Hero>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Load heroes by id. Missing ids are skipped.
    pub async fn find_many(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Hero>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM heroes WHERE id = ANY($1)");
        sqlx::query_as::<_, Hero>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// All heroes in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Hero>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM heroes ORDER BY id ASC");
        sqlx::query_as::<_, Hero>(&query).fetch_all(pool).await
    }

    /// Every hero with its reviews attached.
    pub async fn list_with_reviews(pool: &PgPool) -> Result<Vec<HeroProfile>, sqlx::Error> {
        let heroes = Self::list(pool).await?;
        let mut by_hero: HashMap<DbId, Vec<Review>> = HashMap::new();
        for review in ReviewRepo::list(pool).await? {
            by_hero.entry(review.hero_id).or_default().push(review);
        }
        Ok(heroes
            .into_iter()
            .map(|hero| {
                let reviews = by_hero.remove(&hero.id).unwrap_or_default();
                HeroProfile::new(hero, reviews)
            })
            .collect())
    }

    /// One hero with its reviews, or `None` if no hero has that id.
    pub async fn find_with_reviews(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<HeroProfile>, sqlx::Error> {
        let Some(hero) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let reviews = ReviewRepo::list_by_hero(pool, id).await?;
        Ok(Some(HeroProfile::new(hero, reviews)))
    }

    /// Distinct category labels currently in use.
    pub async fn list_categories(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT category FROM heroes ORDER BY category")
            .fetch_all(pool)
            .await
    }

    /// Update a hero. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateHero,
    ) -> Result<Option<Hero>, sqlx::Error> {
        let query = format!(
            "UPDATE heroes SET
                username = COALESCE($2, username),
                password_hash = COALESCE($3, password_hash),
                alias = COALESCE($4, alias),
                real_name = COALESCE($5, real_name),
                category = COALESCE($6, category),
                description = COALESCE($7, description),
                hourly_rate = COALESCE($8, hourly_rate),
                phone = COALESCE($9, phone),
                email = COALESCE($10, email),
                location = COALESCE($11, location),
                powers = COALESCE($12, powers),
                avatar_url = COALESCE($13, avatar_url),
                video_url = COALESCE($14, video_url),
                trust_factor = COALESCE($15, trust_factor)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Hero>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.alias)
            .bind(&input.real_name)
            .bind(input.category.as_ref().map(|c| c.label()))
            .bind(&input.description)
            .bind(input.hourly_rate)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.location)
            .bind(&input.powers)
            .bind(&input.avatar_url)
            .bind(&input.video_url)
            .bind(input.trust_factor)
            .fetch_optional(pool)
            .await
    }

    /// Add `delta` to the trust factor in place. No bounds are applied.
    pub async fn adjust_trust(
        pool: &PgPool,
        id: DbId,
        delta: i64,
    ) -> Result<Option<Hero>, sqlx::Error> {
        let query = format!(
            "UPDATE heroes SET trust_factor = trust_factor + $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Hero>(&query)
            .bind(id)
            .bind(delta)
            .fetch_optional(pool)
            .await
    }

    /// Delete a hero. Missions and reviews go with it (`ON DELETE CASCADE`).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM heroes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
