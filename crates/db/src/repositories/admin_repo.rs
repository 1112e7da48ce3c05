//! Repository for the `admins` table.

use sqlx::PgPool;

use crate::models::admin::{Admin, CreateAdmin};

const COLUMNS: &str = "id, username, password_hash, created_at, updated_at";

pub struct AdminRepo;

impl AdminRepo {
    /// Insert a new admin, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAdmin) -> Result<Admin, sqlx::Error> {
        let query = format!(
            "INSERT INTO admins (username, password_hash) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Admin>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Insert the admin unless the username is already taken.
    ///
    /// Returns `true` when a row was inserted.
    pub async fn create_if_missing(pool: &PgPool, input: &CreateAdmin) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO admins (username, password_hash) VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT uq_admins_username DO NOTHING",
        )
        .bind(&input.username)
        .bind(&input.password_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE username = $1");
        sqlx::query_as::<_, Admin>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }
}
