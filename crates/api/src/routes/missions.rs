//! Route definitions for missions.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::missions;
use crate::state::AppState;

/// Mission routes, merged at the `/api` root.
///
/// ```text
/// POST /request                -> create (public)
/// GET  /request                -> list (admin)
/// GET  /hero/my-missions       -> my_missions (hero)
/// PUT  /missions/{id}/status   -> update_status (hero)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/request", post(missions::create).get(missions::list))
        .route("/hero/my-missions", get(missions::my_missions))
        .route("/missions/{id}/status", put(missions::update_status))
}
