pub mod admin;
pub mod auth;
pub mod health;
pub mod heroes;
pub mod missions;

use axum::routing::post;
use axum::Router;

use crate::handlers::{applications, reviews};
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /auth/login                              admin login (public)
/// /auth/hero-login                         hero login (public)
///
/// /apply-hero                              submit application (public)
/// /admin/applications                      list (admin)
/// /admin/applications/{id}                 discard (admin)
/// /admin/applications/{id}/recruit-draft   pre-filled hero form (admin)
///
/// /heroes                                  directory (public), create (admin)
/// /heroes/categories                       category list (public)
/// /heroes/{id}                             profile (public), update, delete (admin)
/// /heroes/{id}/trust                       manual trust adjustment (admin)
///
/// /request                                 create mission (public), list all (admin)
/// /hero/my-missions                        missions of the calling hero
/// /missions/{id}/status                    lifecycle transition (hero)
///
/// /reviews                                 submit review (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/heroes", heroes::router())
        .merge(missions::router())
        .route("/apply-hero", post(applications::apply))
        .route("/reviews", post(reviews::create))
}
