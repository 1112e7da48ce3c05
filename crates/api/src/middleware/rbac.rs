//! Role-based access control extractors.
//!
//! Each extractor wraps [`Session`] and rejects requests whose role does not
//! match with 403 Forbidden.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use superfix_core::error::CoreError;
use superfix_core::roles::Role;

use super::auth::Session;
use crate::error::AppError;
use crate::state::AppState;

async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    role: Role,
) -> Result<Session, AppError> {
    let session = Session::from_request_parts(parts, state).await?;
    if session.role != role {
        tracing::warn!(
            principal_id = session.principal_id,
            role = %session.role,
            required = %role,
            "Role check failed"
        );
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "{role} role required"
        ))));
    }
    Ok(session)
}

/// Requires the `ADMIN` role.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(session): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub Session);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, Role::Admin).await.map(RequireAdmin)
    }
}

/// Requires the `HERO` role. `session.principal_id` is the hero's id.
pub struct RequireHero(pub Session);

impl FromRequestParts<AppState> for RequireHero {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, Role::Hero).await.map(RequireHero)
    }
}
