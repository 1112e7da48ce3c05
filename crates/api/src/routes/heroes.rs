//! Route definitions for the `/heroes` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::heroes;
use crate::state::AppState;

/// Routes mounted at `/heroes`.
///
/// ```text
/// GET    /              -> list (public)
/// POST   /              -> create (admin)
/// GET    /categories    -> categories (public)
/// GET    /{id}          -> get_by_id (public)
/// PUT    /{id}          -> update (admin)
/// DELETE /{id}          -> delete (admin)
/// POST   /{id}/trust    -> adjust_trust (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(heroes::list).post(heroes::create))
        .route("/categories", get(heroes::categories))
        .route(
            "/{id}",
            get(heroes::get_by_id)
                .put(heroes::update)
                .delete(heroes::delete),
        )
        .route("/{id}/trust", post(heroes::adjust_trust))
}
