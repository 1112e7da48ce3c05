#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use superfix_api::app::build_router;
use superfix_api::auth::jwt::{generate_access_token, JwtConfig};
use superfix_api::auth::password::hash_password;
use superfix_api::config::{ServerConfig, DEFAULT_HERO_PASSWORD};
use superfix_api::state::AppState;
use superfix_core::category::{JobCategory, KnownCategory};
use superfix_core::roles::Role;
use superfix_db::models::admin::CreateAdmin;
use superfix_db::models::hero::{CreateHero, Hero};
use superfix_db::repositories::{AdminRepo, HeroRepo};
use superfix_events::bus::Published;
use superfix_events::{EventBus, SuperfixEvent};
use tokio::sync::broadcast;

pub const ADMIN_PASSWORD: &str = "admin-password-1";
pub const HERO_PASSWORD: &str = "hero-password-1";

/// Build a test `ServerConfig` with email disabled.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        max_body_bytes: 1024 * 1024,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            admin_expiry_hours: 24,
            hero_expiry_hours: 168,
        },
        default_hero_password: DEFAULT_HERO_PASSWORD.to_string(),
        admin_bootstrap: None,
        email: None,
    }
}

/// Test application plus a subscription to everything it publishes.
pub struct TestApp {
    pub router: Router,
    pub events: broadcast::Receiver<Published<SuperfixEvent>>,
    // Keeps the channel open for the lifetime of the test.
    _bus: Arc<EventBus>,
}

impl TestApp {
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Every event published so far, oldest first.
    pub fn drain_events(&mut self) -> Vec<SuperfixEvent> {
        let mut events = Vec::new();
        while let Ok(published) = self.events.try_recv() {
            events.push(published.event);
        }
        events
    }
}

/// Build the full application router, with the same middleware stack
/// production uses.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let bus = Arc::new(EventBus::default());
    let events = bus.subscribe();
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
        event_bus: Arc::clone(&bus),
    };
    TestApp {
        router: build_router(state),
        events,
        _bus: bus,
    }
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// Insert an admin and return a valid admin token.
pub async fn seed_admin(pool: &PgPool, username: &str) -> String {
    let admin = AdminRepo::create(
        pool,
        &CreateAdmin {
            username: username.to_string(),
            password_hash: hash_password(ADMIN_PASSWORD).unwrap(),
        },
    )
    .await
    .unwrap();
    generate_access_token(admin.id, Role::Admin, None, &test_config().jwt).unwrap()
}

/// Insert a hero (password [`HERO_PASSWORD`]) and return it with a valid
/// hero token.
pub async fn seed_hero(pool: &PgPool, username: &str, email: Option<&str>) -> (Hero, String) {
    let hero = HeroRepo::create(
        pool,
        &CreateHero {
            username: username.to_string(),
            password_hash: hash_password(HERO_PASSWORD).unwrap(),
            alias: format!("Captain {username}"),
            real_name: Some("Ion Popescu".to_string()),
            category: JobCategory::Known(KnownCategory::Electrician),
            description: None,
            hourly_rate: Some(150),
            phone: Some("0700000001".to_string()),
            email: email.map(str::to_string),
            location: Some("Bucharest".to_string()),
            powers: None,
            avatar_url: None,
            video_url: None,
            trust_factor: None,
        },
    )
    .await
    .unwrap();
    let token =
        generate_access_token(hero.id, Role::Hero, Some(&hero.alias), &test_config().jwt).unwrap();
    (hero, token)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::get(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request("POST", uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, json_request("POST", uri, Some(token), body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, json_request("PUT", uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::delete(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Assert the status and return the parsed body.
pub async fn expect_json(response: Response, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
