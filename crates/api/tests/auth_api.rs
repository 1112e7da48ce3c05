//! HTTP-level tests for login and role enforcement.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, expect_json, get, get_auth, post_json, seed_admin, seed_hero, ADMIN_PASSWORD,
    HERO_PASSWORD,
};
use sqlx::PgPool;
use superfix_api::auth::jwt::validate_token;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_login_returns_admin_token(pool: PgPool) {
    seed_admin(&pool, "boss").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app.router(),
        "/api/auth/login",
        serde_json::json!({ "username": "boss", "password": ADMIN_PASSWORD }),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;

    assert_eq!(json["role"], "ADMIN");
    let claims = validate_token(json["token"].as_str().unwrap(), &common::test_config().jwt)
        .expect("issued token must validate");
    assert_eq!(claims.role.as_str(), "ADMIN");
    assert!(claims.alias.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_login_wrong_password(pool: PgPool) {
    seed_admin(&pool, "boss").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app.router(),
        "/api/auth/login",
        serde_json::json!({ "username": "boss", "password": "nope" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_login_unknown_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.router(),
        "/api/auth/login",
        serde_json::json!({ "username": "ghost", "password": "whatever" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_hero_cannot_use_admin_login(pool: PgPool) {
    seed_hero(&pool, "voltaj", None).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app.router(),
        "/api/auth/login",
        serde_json::json!({ "username": "voltaj", "password": HERO_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_hero_login_returns_hero_id_and_alias(pool: PgPool) {
    let (hero, _) = seed_hero(&pool, "voltaj", None).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app.router(),
        "/api/auth/hero-login",
        serde_json::json!({ "username": "voltaj", "password": HERO_PASSWORD }),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;

    assert_eq!(json["role"], "HERO");
    assert_eq!(json["heroId"], hero.id);
    let claims =
        validate_token(json["token"].as_str().unwrap(), &common::test_config().jwt).unwrap();
    assert_eq!(claims.sub, hero.id);
    assert_eq!(claims.alias.as_deref(), Some("Captain voltaj"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_hero_login_wrong_password(pool: PgPool) {
    seed_hero(&pool, "voltaj", None).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app.router(),
        "/api/auth/hero-login",
        serde_json::json!({ "username": "voltaj", "password": "wrong" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Role enforcement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.router(), "/api/admin/applications").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_garbage_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(app.router(), "/api/admin/applications", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_hero_token_on_admin_route_is_forbidden(pool: PgPool) {
    let (_, hero_token) = seed_hero(&pool, "voltaj", None).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app.router(), "/api/request", &hero_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_token_on_hero_route_is_forbidden(pool: PgPool) {
    let admin_token = seed_admin(&pool, "boss").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app.router(), "/api/hero/my-missions", &admin_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_bootstrap_is_idempotent(pool: PgPool) {
    use superfix_api::app::bootstrap_admin;
    use superfix_api::config::AdminBootstrap;

    let bootstrap = AdminBootstrap {
        username: "root".into(),
        password: "s3cret!".into(),
    };
    assert!(bootstrap_admin(&pool, &bootstrap).await.unwrap());
    assert!(!bootstrap_admin(&pool, &bootstrap).await.unwrap());

    let app = common::build_test_app(pool);
    let response = post_json(
        app.router(),
        "/api/auth/login",
        serde_json::json!({ "username": "root", "password": "s3cret!" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
