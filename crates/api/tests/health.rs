mod common;

use axum::http::StatusCode;
use common::{expect_json, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_reports_database(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.router(), "/health").await;
    assert!(response.headers().contains_key("x-request-id"));
    let json = expect_json(response, StatusCode::OK).await;

    assert_eq!(json["status"], "ok");
    assert_eq!(json["dbHealthy"], true);
    assert!(json["version"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_route_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.router(), "/api/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
