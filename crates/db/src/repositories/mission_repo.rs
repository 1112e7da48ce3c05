//! Repository for the `service_requests` table.

use std::collections::HashMap;

use sqlx::PgPool;
use superfix_core::mission::{MissionStatus, TransitionPlan};
use superfix_core::types::DbId;

use crate::models::mission::{CreateMission, Mission, MissionWithHero};
use crate::repositories::HeroRepo;

const COLUMNS: &str = "id, hero_id, client_name, client_phone, client_email, description, \
     status, photo_before, photo_after, created_at, updated_at";

pub struct MissionRepo;

impl MissionRepo {
    /// Insert a `PENDING` mission for an existing hero.
    ///
    /// Returns `None`, writing nothing, when the hero does not exist.
    pub async fn create(pool: &PgPool, input: &CreateMission) -> Result<Option<Mission>, sqlx::Error> {
        let query = format!(
            "INSERT INTO service_requests
                (hero_id, client_name, client_phone, client_email, description, status)
             SELECT $1, $2, $3, $4, $5, $6
             WHERE EXISTS (SELECT 1 FROM heroes WHERE id = $1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mission>(&query)
            .bind(input.hero_id)
            .bind(input.client_name.trim())
            .bind(input.client_phone.trim())
            .bind(&input.client_email)
            .bind(&input.description)
            .bind(MissionStatus::Pending.as_str())
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Mission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM service_requests WHERE id = $1");
        sqlx::query_as::<_, Mission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every mission, newest first, with the assigned hero attached.
    pub async fn list_with_hero(pool: &PgPool) -> Result<Vec<MissionWithHero>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM service_requests ORDER BY created_at DESC, id DESC"
        );
        let missions = sqlx::query_as::<_, Mission>(&query).fetch_all(pool).await?;
        Self::attach_heroes(pool, missions).await
    }

    /// Missions assigned to one hero, newest first, with the hero attached.
    pub async fn list_by_hero_with_hero(
        pool: &PgPool,
        hero_id: DbId,
    ) -> Result<Vec<MissionWithHero>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM service_requests
             WHERE hero_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        let missions = sqlx::query_as::<_, Mission>(&query)
            .bind(hero_id)
            .fetch_all(pool)
            .await?;
        Self::attach_heroes(pool, missions).await
    }

    async fn attach_heroes(
        pool: &PgPool,
        missions: Vec<Mission>,
    ) -> Result<Vec<MissionWithHero>, sqlx::Error> {
        let mut ids: Vec<DbId> = missions.iter().map(|m| m.hero_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let heroes: HashMap<DbId, _> = HeroRepo::find_many(pool, &ids)
            .await?
            .into_iter()
            .map(|h| (h.id, h))
            .collect();

        Ok(missions
            .into_iter()
            .map(|mission| MissionWithHero {
                hero: heroes.get(&mission.hero_id).cloned(),
                mission,
            })
            .collect())
    }

    /// Apply a validated transition in one transaction.
    ///
    /// The status write is conditional on the mission still being in
    /// `plan.from`; if another request moved it first, nothing is written and
    /// `None` is returned. Hero counters are incremented on the mission's
    /// assigned hero in the same transaction.
    pub async fn apply_transition(
        pool: &PgPool,
        id: DbId,
        plan: &TransitionPlan,
    ) -> Result<Option<Mission>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE service_requests SET
                status = $2,
                photo_before = COALESCE($3, photo_before),
                photo_after = COALESCE($4, photo_after)
             WHERE id = $1 AND status = $5
             RETURNING {COLUMNS}"
        );
        let mission = sqlx::query_as::<_, Mission>(&query)
            .bind(id)
            .bind(plan.to.as_str())
            .bind(&plan.photo_before)
            .bind(&plan.photo_after)
            .bind(plan.from.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(mission) = mission else {
            tx.rollback().await?;
            return Ok(None);
        };

        if plan.touches_hero() {
            sqlx::query(
                "UPDATE heroes SET
                    trust_factor = trust_factor + $2,
                    missions_completed = missions_completed + $3
                 WHERE id = $1",
            )
            .bind(mission.hero_id)
            .bind(plan.trust_delta)
            .bind(plan.missions_delta)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(Some(mission))
    }
}
