//! Handlers for the `/auth` resource (admin and hero login).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use superfix_core::error::CoreError;
use superfix_core::roles::Role;
use superfix_core::types::DbId;
use superfix_db::repositories::{AdminRepo, HeroRepo};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for both login endpoints.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AdminLoginResponse {
    pub token: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroLoginResponse {
    pub token: String,
    pub role: Role,
    pub hero_id: DbId,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid credentials".into()))
}

fn check_password(password: &str, hash: &str) -> AppResult<bool> {
    verify_password(password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))
}

fn issue_token(id: DbId, role: Role, alias: Option<&str>, state: &AppState) -> AppResult<String> {
    generate_access_token(id, role, alias, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AdminLoginResponse>> {
    let Some(admin) = AdminRepo::find_by_username(&state.pool, &input.username).await? else {
        tracing::warn!(username = %input.username, "Admin login for unknown username");
        return Err(invalid_credentials());
    };

    if !check_password(&input.password, &admin.password_hash)? {
        tracing::warn!(admin_id = admin.id, "Admin login with wrong password");
        return Err(invalid_credentials());
    }

    let token = issue_token(admin.id, Role::Admin, None, &state)?;
    tracing::info!(admin_id = admin.id, "Admin logged in");

    Ok(Json(AdminLoginResponse {
        token,
        role: Role::Admin,
    }))
}

/// POST /api/auth/hero-login
pub async fn hero_login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<HeroLoginResponse>> {
    let Some(hero) = HeroRepo::find_by_username(&state.pool, &input.username).await? else {
        tracing::warn!(username = %input.username, "Hero login for unknown username");
        return Err(invalid_credentials());
    };

    if !check_password(&input.password, &hero.password_hash)? {
        tracing::warn!(hero_id = hero.id, "Hero login with wrong password");
        return Err(invalid_credentials());
    }

    let token = issue_token(hero.id, Role::Hero, Some(&hero.alias), &state)?;
    tracing::info!(hero_id = hero.id, "Hero logged in");

    Ok(Json(HeroLoginResponse {
        token,
        role: Role::Hero,
        hero_id: hero.id,
    }))
}
