//! Handlers for the hero directory and hero administration.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use superfix_core::category::JobCategory;
use superfix_core::directory::{category_list, DirectoryQuery};
use superfix_core::error::CoreError;
use superfix_core::trust::{validate_assigned_trust, validate_manual_adjustment};
use superfix_core::types::DbId;
use superfix_core::validation::{
    non_blank, validate_optional_email, validate_required, MAX_LONG_TEXT_LENGTH,
    MAX_SHORT_TEXT_LENGTH,
};
use superfix_db::models::hero::{CreateHero, Hero, HeroProfile, UpdateHero};
use superfix_db::repositories::HeroRepo;
use superfix_events::bus::Credential;
use superfix_events::SuperfixEvent;

use crate::auth::password::hash_password;
use crate::error::{is_unique_violation, AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::AckResponse;
use crate::state::AppState;

const USERNAME_TAKEN: &str = "Username already taken";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /heroes`.
///
/// `applicationId` recruits from that application: it is consumed in the
/// same transaction that creates the hero.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHeroRequest {
    pub username: String,
    pub password: Option<String>,
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
    pub application_id: Option<DbId>,
}

/// Request body for `PUT /heroes/{id}`. Absent fields are left unchanged;
/// unknown fields such as `id`, `reviews` or `requests` are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHeroRequest {
    pub username: Option<String>,
    pub password: Option<String>,
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

/// Request body for `POST /heroes/{id}/trust`.
#[derive(Debug, Deserialize)]
pub struct TrustAdjustment {
    pub delta: i64,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Hero", id })
}

fn hash(password: &str) -> AppResult<String> {
    hash_password(password).map_err(|e| AppError::InternalError(format!("Hashing error: {e}")))
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Directory (public)
// ---------------------------------------------------------------------------

/// GET /api/heroes
///
/// Every hero with reviews and derived rating figures. `category`, `q` and
/// `sort=trust` narrow or order the list.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<DirectoryQuery>,
) -> AppResult<Json<Vec<HeroProfile>>> {
    let heroes = HeroRepo::list_with_reviews(&state.pool).await?;
    Ok(Json(query.apply(heroes)))
}

/// GET /api/heroes/categories
pub async fn categories(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let in_use = HeroRepo::list_categories(&state.pool).await?;
    Ok(Json(category_list(in_use.iter().map(String::as_str))))
}

/// GET /api/heroes/{id}
///
/// Returns `{}` rather than an error when no hero matches, including ids
/// that are not numeric.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let Ok(id) = id.parse::<DbId>() else {
        return Ok(Json(serde_json::json!({})));
    };
    let body = match HeroRepo::find_with_reviews(&state.pool, id).await? {
        Some(profile) => serde_json::to_value(profile)
            .map_err(|e| AppError::InternalError(format!("Serialization error: {e}")))?,
        None => serde_json::json!({}),
    };
    Ok(Json(body))
}

// ---------------------------------------------------------------------------
// Administration
// ---------------------------------------------------------------------------

/// POST /api/heroes
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateHeroRequest>,
) -> AppResult<(StatusCode, Json<Hero>)> {
    let username = input.username.trim().to_string();
    validate_required("username", &username, MAX_SHORT_TEXT_LENGTH)?;
    validate_required("alias", &input.alias, MAX_SHORT_TEXT_LENGTH)?;
    validate_required("category", input.category.label(), MAX_SHORT_TEXT_LENGTH)?;
    validate_optional_email("email", input.email.as_deref())?;
    if let Some(trust) = input.trust_factor {
        validate_assigned_trust(trust)?;
    }

    if HeroRepo::find_by_username(&state.pool, &username)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(USERNAME_TAKEN.into()));
    }

    let password = non_blank(input.password.as_deref())
        .unwrap_or(state.config.default_hero_password.as_str())
        .to_string();

    let dto = CreateHero {
        username,
        password_hash: hash(&password)?,
        alias: input.alias.trim().to_string(),
        real_name: trimmed(input.real_name),
        category: input.category,
        description: input.description,
        hourly_rate: input.hourly_rate,
        phone: trimmed(input.phone),
        email: trimmed(input.email),
        location: trimmed(input.location),
        powers: input.powers,
        avatar_url: trimmed(input.avatar_url),
        video_url: trimmed(input.video_url),
        trust_factor: input.trust_factor,
    };

    let inserted = match input.application_id {
        Some(application_id) => HeroRepo::create_from_application(&state.pool, application_id, &dto)
            .await
            .map(|hero| hero.ok_or(application_id)),
        None => HeroRepo::create(&state.pool, &dto).await.map(Ok),
    };
    let hero = match inserted {
        Ok(Ok(hero)) => hero,
        Ok(Err(application_id)) => {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "HeroApplication",
                id: application_id,
            }));
        }
        // Lost a race with a concurrent create of the same username.
        Err(e) if is_unique_violation(&e, "uq_heroes_username") => {
            return Err(AppError::BadRequest(USERNAME_TAKEN.into()));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        hero_id = hero.id,
        admin_id = admin.principal_id,
        application_id = ?input.application_id,
        "Hero created"
    );

    state.event_bus.publish(SuperfixEvent::HeroRecruited {
        hero_id: hero.id,
        alias: hero.alias.clone(),
        username: hero.username.clone(),
        email: hero.email.clone(),
        password: Credential::new(password),
    });

    Ok((StatusCode::CREATED, Json(hero)))
}

/// PUT /api/heroes/{id}
///
/// Text fields are trimmed the same way as on create. A blank value leaves
/// the stored one unchanged, and so does a blank `password`.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateHeroRequest>,
) -> AppResult<Json<Hero>> {
    let username = trimmed(input.username);
    let alias = trimmed(input.alias);
    let email = trimmed(input.email);
    if let Some(username) = username.as_deref() {
        validate_required("username", username, MAX_SHORT_TEXT_LENGTH)?;
    }
    if let Some(alias) = alias.as_deref() {
        validate_required("alias", alias, MAX_SHORT_TEXT_LENGTH)?;
    }
    if let Some(category) = input.category.as_ref() {
        validate_required("category", category.label(), MAX_SHORT_TEXT_LENGTH)?;
    }
    if let Some(description) = input.description.as_deref() {
        if description.len() > MAX_LONG_TEXT_LENGTH {
            return Err(AppError::Core(CoreError::Validation(format!(
                "description must be at most {MAX_LONG_TEXT_LENGTH} characters"
            ))));
        }
    }
    validate_optional_email("email", email.as_deref())?;
    if let Some(trust) = input.trust_factor {
        validate_assigned_trust(trust)?;
    }

    let password_hash = match non_blank(input.password.as_deref()) {
        Some(password) => Some(hash(password)?),
        None => None,
    };

    let dto = UpdateHero {
        username,
        password_hash,
        alias,
        real_name: trimmed(input.real_name),
        category: input.category,
        description: input.description,
        hourly_rate: input.hourly_rate,
        phone: trimmed(input.phone),
        email,
        location: trimmed(input.location),
        powers: input.powers,
        avatar_url: trimmed(input.avatar_url),
        video_url: trimmed(input.video_url),
        trust_factor: input.trust_factor,
    };

    let hero = HeroRepo::update(&state.pool, id, &dto)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        hero_id = id,
        admin_id = admin.principal_id,
        password_changed = dto.password_hash.is_some(),
        "Hero updated"
    );
    Ok(Json(hero))
}

/// POST /api/heroes/{id}/trust
///
/// Manual +1 / -1 trust adjustment, applied in place.
pub async fn adjust_trust(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TrustAdjustment>,
) -> AppResult<Json<Hero>> {
    let delta = validate_manual_adjustment(input.delta)?;
    let hero = HeroRepo::adjust_trust(&state.pool, id, delta)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        hero_id = id,
        admin_id = admin.principal_id,
        delta,
        trust_factor = hero.trust_factor,
        "Trust factor adjusted"
    );
    Ok(Json(hero))
}

/// DELETE /api/heroes/{id}
///
/// The hero's missions and reviews are removed with it.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<AckResponse>> {
    if !HeroRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(hero_id = id, admin_id = admin.principal_id, "Hero deleted");
    Ok(Json(AckResponse::ok()))
}
