//! Handlers for hero applications: public intake and the admin queue.

use axum::extract::{Path, State};
use axum::Json;
use superfix_core::error::CoreError;
use superfix_core::types::DbId;
use superfix_core::validation::validate_application;
use superfix_db::models::application::{CreateHeroApplication, HeroApplication, RecruitDraft};
use superfix_db::repositories::ApplicationRepo;
use superfix_events::SuperfixEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::AckResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "HeroApplication",
        id,
    })
}

/// POST /api/apply-hero
///
/// Store the application, then notify operations and the applicant.
pub async fn apply(
    State(state): State<AppState>,
    Json(input): Json<CreateHeroApplication>,
) -> AppResult<Json<AckResponse>> {
    validate_application(
        &input.name,
        &input.email,
        &input.phone,
        input.category.label(),
    )?;

    let application = ApplicationRepo::create(&state.pool, &input).await?;
    tracing::info!(
        application_id = application.id,
        category = %application.category,
        "Hero application received"
    );

    state.event_bus.publish(SuperfixEvent::ApplicationReceived {
        application_id: application.id,
        name: application.name,
        email: application.email,
        phone: application.phone,
        category: application.category.label().to_string(),
    });

    Ok(Json(AckResponse::created(application.id)))
}

/// GET /api/admin/applications
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<HeroApplication>>> {
    Ok(Json(ApplicationRepo::list(&state.pool).await?))
}

/// DELETE /api/admin/applications/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<AckResponse>> {
    if !ApplicationRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(application_id = id, admin_id = admin.principal_id, "Application discarded");
    Ok(Json(AckResponse::ok()))
}

/// GET /api/admin/applications/{id}/recruit-draft
///
/// Pre-filled hero form for the application. The application stays queued
/// until a hero is created with its `applicationId`.
pub async fn recruit_draft(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<RecruitDraft>> {
    let application = ApplicationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(RecruitDraft::from(&application)))
}
