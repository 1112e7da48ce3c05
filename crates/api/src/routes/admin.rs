//! Route definitions for the `/admin` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::applications;
use crate::state::AppState;

/// Routes mounted at `/admin`. Every handler requires the `ADMIN` role.
///
/// ```text
/// GET    /applications                      -> list
/// DELETE /applications/{id}                 -> delete
/// GET    /applications/{id}/recruit-draft   -> recruit_draft
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/applications", get(applications::list))
        .route("/applications/{id}", delete(applications::delete))
        .route(
            "/applications/{id}/recruit-draft",
            get(applications::recruit_draft),
        )
}
