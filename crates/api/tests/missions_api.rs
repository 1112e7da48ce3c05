//! HTTP-level tests for mission creation and the mission lifecycle.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::Router;
use common::{
    body_json, expect_json, get_auth, post_json, put_json_auth, seed_admin, seed_hero,
};
use sqlx::PgPool;
use superfix_core::types::DbId;
use superfix_db::models::hero::UpdateHero;
use superfix_db::repositories::HeroRepo;
use superfix_events::SuperfixEvent;

async fn request_mission(app: Router, hero_id: DbId, client_email: Option<&str>) -> DbId {
    let response = post_json(
        app,
        "/api/request",
        serde_json::json!({
            "heroId": hero_id,
            "clientName": "Maria",
            "clientPhone": "0722",
            "clientEmail": client_email,
            "description": "Sparking socket in the kitchen",
        }),
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["success"], true);
    json["id"].as_i64().unwrap()
}

async fn transition(
    app: Router,
    mission_id: DbId,
    body: serde_json::Value,
    token: &str,
) -> axum::response::Response {
    put_json_auth(app, &format!("/api/missions/{mission_id}/status"), body, token).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_request_creates_pending_mission_and_alerts_hero(pool: PgPool) {
    let (hero, hero_token) = seed_hero(&pool, "voltaj", Some("ion@superfix.ro")).await;
    let mut app = common::build_test_app(pool);

    let id = request_mission(app.router(), hero.id, None).await;

    let json = expect_json(
        get_auth(app.router(), "/api/hero/my-missions", &hero_token).await,
        StatusCode::OK,
    )
    .await;
    let missions = json.as_array().unwrap();
    assert_eq!(missions.len(), 1);
    assert_eq!(missions[0]["id"], id);
    assert_eq!(missions[0]["status"], "PENDING");
    assert_eq!(missions[0]["hero"]["id"], hero.id);
    assert!(missions[0]["date"].is_string());

    assert_matches!(
        app.drain_events().as_slice(),
        [SuperfixEvent::MissionCreated { hero_email: Some(email), .. }] if email == "ion@superfix.ro"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_request_for_unknown_hero_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.router(),
        "/api/request",
        serde_json::json!({
            "heroId": 999,
            "clientName": "Maria",
            "clientPhone": "0722",
            "description": "Leak",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_request_requires_contact_fields(pool: PgPool) {
    let (hero, _) = seed_hero(&pool, "voltaj", None).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app.router(),
        "/api/request",
        serde_json::json!({
            "heroId": hero.id,
            "clientName": "  ",
            "clientPhone": "0722",
            "description": "Leak",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_acceptance_email_uses_current_alias(pool: PgPool) {
    let (hero, token) = seed_hero(&pool, "voltaj", None).await;
    let mut app = common::build_test_app(pool.clone());
    let id = request_mission(app.router(), hero.id, Some("maria@x.ro")).await;

    // Renamed after the hero's token was issued.
    HeroRepo::update(
        &pool,
        hero.id,
        &UpdateHero {
            alias: Some("Fulger".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    app.drain_events();

    let response = transition(app.router(), id, serde_json::json!({ "status": "ACCEPTED" }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_matches!(
        app.drain_events().as_slice(),
        [SuperfixEvent::MissionAccepted { hero_alias, .. }] if hero_alias == "Fulger"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_lifecycle_updates_hero_counters(pool: PgPool) {
    let (hero, token) = seed_hero(&pool, "voltaj", None).await;
    let mut app = common::build_test_app(pool.clone());
    let id = request_mission(app.router(), hero.id, Some("maria@x.ro")).await;
    app.drain_events();

    let json = expect_json(
        transition(app.router(), id, serde_json::json!({ "status": "ACCEPTED" }), &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["status"], "ACCEPTED");
    assert_matches!(
        app.drain_events().as_slice(),
        [SuperfixEvent::MissionAccepted { client_email: Some(email), hero_alias, .. }]
            if email == "maria@x.ro" && hero_alias == "Captain voltaj"
    );

    let json = expect_json(
        transition(
            app.router(),
            id,
            serde_json::json!({ "action": "START_WORK", "photo": "https://img/before.jpg" }),
            &token,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["status"], "IN_PROGRESS");
    assert_eq!(json["photoBefore"], "https://img/before.jpg");

    let json = expect_json(
        transition(
            app.router(),
            id,
            serde_json::json!({ "status": "COMPLETED", "photo": "https://img/after.jpg" }),
            &token,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["status"], "COMPLETED");
    assert_eq!(json["photoAfter"], "https://img/after.jpg");

    let stored = HeroRepo::find_by_id(&pool, hero.id).await.unwrap().unwrap();
    assert_eq!(stored.trust_factor, hero.trust_factor + 5);
    assert_eq!(stored.missions_completed, hero.missions_completed + 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_skipping_a_step_is_invalid_transition(pool: PgPool) {
    let (hero, token) = seed_hero(&pool, "voltaj", None).await;
    let app = common::build_test_app(pool.clone());
    let id = request_mission(app.router(), hero.id, None).await;

    let response = transition(
        app.router(),
        id,
        serde_json::json!({ "status": "COMPLETED", "photo": "https://img/after.jpg" }),
        &token,
    )
    .await;
    let json = expect_json(response, StatusCode::CONFLICT).await;
    assert_eq!(json["code"], "INVALID_TRANSITION");

    let stored = HeroRepo::find_by_id(&pool, hero.id).await.unwrap().unwrap();
    assert_eq!(stored.missions_completed, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_start_work_without_photo_is_rejected(pool: PgPool) {
    let (hero, token) = seed_hero(&pool, "voltaj", None).await;
    let app = common::build_test_app(pool);
    let id = request_mission(app.router(), hero.id, None).await;

    let response =
        transition(app.router(), id, serde_json::json!({ "action": "ACCEPT" }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = transition(
        app.router(),
        id,
        serde_json::json!({ "status": "IN_PROGRESS", "photo": "" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_status_is_bad_request(pool: PgPool) {
    let (hero, token) = seed_hero(&pool, "voltaj", None).await;
    let app = common::build_test_app(pool);
    let id = request_mission(app.router(), hero.id, None).await;

    let response =
        transition(app.router(), id, serde_json::json!({ "status": "DONE" }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = transition(app.router(), id, serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rejection_has_no_trust_penalty(pool: PgPool) {
    let (hero, token) = seed_hero(&pool, "voltaj", None).await;
    let app = common::build_test_app(pool.clone());
    let id = request_mission(app.router(), hero.id, None).await;

    let json = expect_json(
        transition(app.router(), id, serde_json::json!({ "action": "REJECT" }), &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["status"], "REJECTED");

    let stored = HeroRepo::find_by_id(&pool, hero.id).await.unwrap().unwrap();
    assert_eq!(stored.trust_factor, hero.trust_factor);

    // Terminal: nothing leaves REJECTED.
    let response =
        transition(app.router(), id, serde_json::json!({ "status": "ACCEPTED" }), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_other_hero_cannot_transition(pool: PgPool) {
    let (hero, _) = seed_hero(&pool, "voltaj", None).await;
    let (_, intruder_token) = seed_hero(&pool, "intruder", None).await;
    let app = common::build_test_app(pool);
    let id = request_mission(app.router(), hero.id, None).await;

    let response = transition(
        app.router(),
        id,
        serde_json::json!({ "status": "ACCEPTED" }),
        &intruder_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_transition_of_missing_mission_is_404(pool: PgPool) {
    let (_, token) = seed_hero(&pool, "voltaj", None).await;
    let app = common::build_test_app(pool);

    let response =
        transition(app.router(), 999, serde_json::json!({ "status": "ACCEPTED" }), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_lists_all_missions_newest_first(pool: PgPool) {
    let admin = seed_admin(&pool, "boss").await;
    let (a, _) = seed_hero(&pool, "voltaj", None).await;
    let (b, b_token) = seed_hero(&pool, "aqua", None).await;
    let app = common::build_test_app(pool);

    let first = request_mission(app.router(), a.id, None).await;
    let second = request_mission(app.router(), b.id, None).await;

    let json = expect_json(
        get_auth(app.router(), "/api/request", &admin).await,
        StatusCode::OK,
    )
    .await;
    let ids: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second, first]);

    // A hero only sees their own.
    let response = get_auth(app.router(), "/api/hero/my-missions", &b_token).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["heroId"], b.id);
}
