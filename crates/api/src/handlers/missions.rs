//! Handlers for missions (service requests) and their lifecycle.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use superfix_core::error::CoreError;
use superfix_core::mission::{plan_transition, MissionAction, MissionStatus};
use superfix_core::types::DbId;
use superfix_core::validation::{
    non_blank, validate_optional_email, validate_required, MAX_LONG_TEXT_LENGTH,
    MAX_SHORT_TEXT_LENGTH,
};
use superfix_db::models::mission::{CreateMission, Mission, MissionWithHero};
use superfix_db::repositories::{HeroRepo, MissionRepo};
use superfix_events::SuperfixEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireHero};
use crate::response::AckResponse;
use crate::state::AppState;

/// Request body for `PUT /missions/{id}/status`.
///
/// Either `status` (target status name) or `action` (portal button) names
/// the transition; `status` wins when both are present.
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: Option<String>,
    pub action: Option<MissionAction>,
    /// Opaque photo reference, required to start and to complete work.
    pub photo: Option<String>,
}

impl StatusUpdateRequest {
    fn target(&self) -> AppResult<MissionStatus> {
        match (self.status.as_deref(), self.action) {
            (Some(status), _) => Ok(status.trim().parse()?),
            (None, Some(action)) => Ok(action.target()),
            (None, None) => Err(AppError::BadRequest(
                "Either 'status' or 'action' is required".into(),
            )),
        }
    }
}

/// POST /api/request
///
/// Public hero-contact form. The mission starts `PENDING` and the hero is
/// alerted by email.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateMission>,
) -> AppResult<Json<AckResponse>> {
    validate_required("clientName", &input.client_name, MAX_SHORT_TEXT_LENGTH)?;
    validate_required("clientPhone", &input.client_phone, MAX_SHORT_TEXT_LENGTH)?;
    validate_required("description", &input.description, MAX_LONG_TEXT_LENGTH)?;
    validate_optional_email("clientEmail", input.client_email.as_deref())?;

    let input = CreateMission {
        client_email: non_blank(input.client_email.as_deref()).map(|e| e.trim().to_string()),
        ..input
    };

    let mission = MissionRepo::create(&state.pool, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Hero",
            id: input.hero_id,
        }))?;

    tracing::info!(
        mission_id = mission.id,
        hero_id = mission.hero_id,
        "Mission requested"
    );

    let hero_email = HeroRepo::find_by_id(&state.pool, mission.hero_id)
        .await?
        .and_then(|hero| hero.email);
    state.event_bus.publish(SuperfixEvent::MissionCreated {
        mission_id: mission.id,
        hero_id: mission.hero_id,
        hero_email,
        client_name: mission.client_name,
        description: mission.description,
    });

    Ok(Json(AckResponse::created(mission.id)))
}

/// GET /api/request
///
/// Every mission, newest first, with its hero attached.
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MissionWithHero>>> {
    Ok(Json(MissionRepo::list_with_hero(&state.pool).await?))
}

/// GET /api/hero/my-missions
pub async fn my_missions(
    RequireHero(hero): RequireHero,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MissionWithHero>>> {
    Ok(Json(
        MissionRepo::list_by_hero_with_hero(&state.pool, hero.principal_id).await?,
    ))
}

/// PUT /api/missions/{id}/status
///
/// Moves a mission along its lifecycle. Only the assigned hero may do so;
/// the edge must be allowed from the mission's current status, and a
/// request that loses a race with another transition gets 409.
pub async fn update_status(
    RequireHero(hero): RequireHero,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<StatusUpdateRequest>,
) -> AppResult<Json<Mission>> {
    let target = input.target()?;

    let mission = MissionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Mission",
            id,
        }))?;

    if mission.hero_id != hero.principal_id {
        tracing::warn!(
            mission_id = id,
            hero_id = hero.principal_id,
            assigned_hero_id = mission.hero_id,
            "Transition attempted by unassigned hero"
        );
        return Err(AppError::Core(CoreError::Forbidden(
            "Mission is assigned to another hero".into(),
        )));
    }

    let plan = plan_transition(mission.status, target, input.photo.as_deref())?;

    let updated = MissionRepo::apply_transition(&state.pool, id, &plan)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "Mission {id} changed status while this request was in flight"
            )))
        })?;

    tracing::info!(
        mission_id = id,
        hero_id = updated.hero_id,
        from = %plan.from,
        to = %plan.to,
        trust_delta = plan.trust_delta,
        "Mission status changed"
    );

    if plan.notify_client {
        let hero_alias = HeroRepo::find_by_id(&state.pool, updated.hero_id)
            .await?
            .map(|row| row.alias)
            .unwrap_or_else(|| "Your hero".to_string());
        state.event_bus.publish(SuperfixEvent::MissionAccepted {
            mission_id: updated.id,
            hero_alias,
            client_email: updated.client_email.clone(),
        });
    }

    Ok(Json(updated))
}
