//! HTTP-level integration tests for `/api/v1/slots`, including machine
//! assignment.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, build_test_app_with_rules, create_id, delete, get, post_json,
    put_json,
};
use laundry_api::config::BookingRules;
use serde_json::json;
use sqlx::PgPool;

async fn machine(pool: &PgPool, info: &str) -> i64 {
    create_id(
        build_test_app(pool.clone()),
        "/api/v1/machines",
        json!({"info": info, "working": true}),
    )
    .await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_slot_with_machines(pool: PgPool) {
    let washer = machine(&pool, "Washer").await;

    let response = post_json(
        build_test_app(pool),
        "/api/v1/slots",
        json!({"weekday": 1, "start": "08:00", "end": "10:00", "machine_ids": [washer]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["weekday"], 1);
    assert_eq!(json["start"], "08:00");
    assert_eq!(json["end"], "10:00");
    assert_eq!(json["machines"][0]["id"], washer);
    assert_eq!(json["machines"][0]["info"], "Washer");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_slots_rejected(pool: PgPool) {
    let cases = [
        json!({"weekday": 7, "start": "08:00", "end": "10:00"}),
        json!({"weekday": 1, "start": "10:00", "end": "08:00"}),
        json!({"weekday": 1, "start": "8 o'clock", "end": "10:00"}),
        json!({"start": "08:00", "end": "10:00"}),
    ];

    for body in cases {
        let response = post_json(build_test_app(pool.clone()), "/api/v1/slots", body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_minimum_slot_duration(pool: PgPool) {
    let rules = BookingRules {
        min_slot_duration_minutes: 60,
        ..BookingRules::default()
    };

    let response = post_json(
        build_test_app_with_rules(pool.clone(), rules),
        "/api/v1/slots",
        json!({"weekday": 1, "start": "08:00", "end": "08:30"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        build_test_app_with_rules(pool, rules),
        "/api/v1/slots",
        json!({"weekday": 1, "start": "08:00", "end": "09:00"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_machine_id_is_validation_error(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/slots",
        json!({"weekday": 1, "start": "08:00", "end": "10:00", "machine_ids": [999999]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_slots_in_catalog_order(pool: PgPool) {
    for body in [
        json!({"weekday": 2, "start": "08:00", "end": "10:00"}),
        json!({"weekday": 1, "start": "12:00", "end": "14:00"}),
        json!({"weekday": 1, "start": "08:00", "end": "10:00"}),
    ] {
        create_id(build_test_app(pool.clone()), "/api/v1/slots", body).await;
    }

    let response = get(build_test_app(pool), "/api/v1/slots").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let order: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|s| (s["weekday"].as_i64().unwrap(), s["start"].as_str().unwrap().to_string()))
        .collect();
    assert_eq!(
        order,
        vec![
            (1, "08:00".to_string()),
            (1, "12:00".to_string()),
            (2, "08:00".to_string()),
        ]
    );
    assert!(json[0]["machines"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_machine_assignment(pool: PgPool) {
    let washer = machine(&pool, "Washer").await;
    let dryer = machine(&pool, "Dryer").await;
    let slot = create_id(
        build_test_app(pool.clone()),
        "/api/v1/slots",
        json!({"weekday": 3, "start": "18:00", "end": "20:00"}),
    )
    .await;

    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/slots/{slot}/machines"),
        json!({"machine_ids": [washer, dryer, washer]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["machines"].as_array().unwrap().len(), 2);

    let response = delete(
        build_test_app(pool.clone()),
        &format!("/api/v1/slots/{slot}/machines/{washer}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(
        build_test_app(pool.clone()),
        &format!("/api/v1/slots/{slot}/machines/{washer}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(build_test_app(pool), &format!("/api/v1/slots/{slot}")).await;
    let json = body_json(response).await;
    assert_eq!(json["machines"].as_array().unwrap().len(), 1);
    assert_eq!(json["machines"][0]["id"], dryer);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_add_machines_is_all_or_nothing(pool: PgPool) {
    let washer = machine(&pool, "Washer").await;
    let slot = create_id(
        build_test_app(pool.clone()),
        "/api/v1/slots",
        json!({"weekday": 3, "start": "18:00", "end": "20:00"}),
    )
    .await;

    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/slots/{slot}/machines"),
        json!({"machine_ids": [washer, 999999]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    // The valid machine before the unknown one was not attached either
    let response = get(build_test_app(pool), &format!("/api/v1/slots/{slot}")).await;
    assert!(body_json(response).await["machines"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_slot(pool: PgPool) {
    let washer = machine(&pool, "Washer").await;
    let slot = create_id(
        build_test_app(pool.clone()),
        "/api/v1/slots",
        json!({"weekday": 0, "start": "08:00", "end": "10:00", "machine_ids": [washer]}),
    )
    .await;

    // Without machine_ids the machines stay attached
    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/slots/{slot}"),
        json!({"week_day": 4, "start": "09:30", "end": "11:00"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["weekday"], 4);
    assert_eq!(json["start"], "09:30");
    assert_eq!(json["machines"].as_array().unwrap().len(), 1);

    // An explicit empty list detaches everything
    let response = put_json(
        build_test_app(pool),
        &format!("/api/v1/slots/{slot}"),
        json!({"weekday": 4, "start": "09:30", "end": "11:00", "machine_ids": []}),
    )
    .await;
    assert!(body_json(response).await["machines"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_slot(pool: PgPool) {
    let slot = create_id(
        build_test_app(pool.clone()),
        "/api/v1/slots",
        json!({"weekday": 5, "start": "08:00", "end": "10:00"}),
    )
    .await;

    let response = delete(build_test_app(pool.clone()), &format!("/api/v1/slots/{slot}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool), &format!("/api/v1/slots/{slot}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_numeric_machine_id_is_json_bad_request(pool: PgPool) {
    let response = delete(build_test_app(pool), "/api/v1/slots/1/machines/washer").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
