//! HTTP-level integration tests for `/api/v1/bookings` and the upcoming
//! bookings of a booker.

mod common;

use axum::http::StatusCode;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use common::{
    body_json, build_test_app, build_test_app_with_rules, create_id, delete, get, post_json,
};
use laundry_api::config::BookingRules;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A date `days` from today together with its weekday number (0 = Monday).
fn days_from_today(days: i64) -> (NaiveDate, i64) {
    let date = Utc::now().date_naive() + Duration::days(days);
    (date, i64::from(date.weekday().num_days_from_monday()))
}

async fn booker(pool: &PgPool, identifier: &str) -> i64 {
    create_id(
        build_test_app(pool.clone()),
        "/api/v1/bookers",
        json!({"identifier": identifier}),
    )
    .await
}

async fn slot(pool: &PgPool, weekday: i64, start: &str, end: &str) -> i64 {
    create_id(
        build_test_app(pool.clone()),
        "/api/v1/slots",
        json!({"weekday": weekday, "start": start, "end": end}),
    )
    .await
}

fn booking_body(date: NaiveDate, slot_id: i64, booker_id: i64) -> serde_json::Value {
    json!({
        "book_date": date.format("%Y-%m-%d").to_string(),
        "slot_id": slot_id,
        "booker_id": booker_id,
    })
}

// ---------------------------------------------------------------------------
// Test: create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_booking_returns_record(pool: PgPool) {
    let washer = create_id(
        build_test_app(pool.clone()),
        "/api/v1/machines",
        json!({"info": "Washer", "working": true}),
    )
    .await;
    let tuesday = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    let booker_id = booker(&pool, "12B").await;
    let slot_id = create_id(
        build_test_app(pool.clone()),
        "/api/v1/slots",
        json!({"weekday": 1, "start": "08:00", "end": "10:00", "machine_ids": [washer]}),
    )
    .await;

    let response = post_json(
        build_test_app(pool),
        "/api/v1/bookings",
        booking_body(tuesday, slot_id, booker_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["date"], "2024-03-05");
    assert_eq!(json["slot"]["id"], slot_id);
    assert_eq!(json["slot"]["start"], "08:00");
    assert_eq!(json["booker"]["identifier"], "12B");
    assert_eq!(json["machines"][0]["id"], washer);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_booking_on_wrong_weekday_rejected(pool: PgPool) {
    let booker_id = booker(&pool, "12B").await;
    let slot_id = slot(&pool, 1, "08:00", "10:00").await;
    let wednesday = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();

    let response = post_json(
        build_test_app(pool),
        "/api/v1/bookings",
        booking_body(wednesday, slot_id, booker_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_booking_unknown_slot_or_booker_is_404(pool: PgPool) {
    let booker_id = booker(&pool, "12B").await;
    let slot_id = slot(&pool, 1, "08:00", "10:00").await;
    let tuesday = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/bookings",
        booking_body(tuesday, 999_999, booker_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json(
        build_test_app(pool),
        "/api/v1/bookings",
        booking_body(tuesday, slot_id, 999_999),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_book_date_rejected(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/bookings",
        json!({"slot_id": 1, "booker_id": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["errors"][0], "Missing parameter book_date");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_double_booking_returns_409(pool: PgPool) {
    let first = booker(&pool, "12B").await;
    let second = booker(&pool, "3A").await;
    let slot_id = slot(&pool, 1, "08:00", "10:00").await;
    let tuesday = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

    create_id(
        build_test_app(pool.clone()),
        "/api/v1/bookings",
        booking_body(tuesday, slot_id, first),
    )
    .await;

    let response = post_json(
        build_test_app(pool),
        "/api/v1/bookings",
        booking_body(tuesday, slot_id, second),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_max_bookings_per_booker(pool: PgPool) {
    let rules = BookingRules {
        max_bookings_per_booker: 1,
        ..BookingRules::default()
    };
    let booker_id = booker(&pool, "12B").await;
    let (next_week, weekday) = days_from_today(7);
    let slot_id = slot(&pool, weekday, "08:00", "10:00").await;

    let response = post_json(
        build_test_app_with_rules(pool.clone(), rules),
        "/api/v1/bookings",
        booking_body(next_week, slot_id, booker_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        build_test_app_with_rules(pool, rules),
        "/api/v1/bookings",
        booking_body(next_week + Duration::days(7), slot_id, booker_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Test: search, get, delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_by_interval_and_booker(pool: PgPool) {
    let alice = booker(&pool, "12B").await;
    let bob = booker(&pool, "3A").await;
    let slot_id = slot(&pool, 1, "08:00", "10:00").await;

    for (date, who) in [("2024-03-05", alice), ("2024-03-12", bob), ("2024-03-19", alice)] {
        create_id(
            build_test_app(pool.clone()),
            "/api/v1/bookings",
            json!({"book_date": date, "slot_id": slot_id, "booker_id": who}),
        )
        .await;
    }

    let response = get(
        build_test_app(pool.clone()),
        "/api/v1/bookings?start=2024-03-01&end=2024-03-15",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let dates: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["date"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(dates, vec!["2024-03-05", "2024-03-12"]);

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/bookings?start=2024-03-01&end=2024-03-31&booker_id={alice}"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert!(json
        .as_array()
        .unwrap()
        .iter()
        .all(|b| b["booker"]["identifier"] == "12B"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_rejects_bad_intervals(pool: PgPool) {
    let response = get(
        build_test_app(pool.clone()),
        "/api/v1/bookings?start=2024-03-10&end=2024-03-01",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_INTERVAL");

    let response = get(
        build_test_app(pool.clone()),
        "/api/v1/bookings?start=2024-02-30&end=2024-03-01",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_INTERVAL");

    let response = get(build_test_app(pool), "/api/v1/bookings?start=2024-03-01").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errors"][0], "Missing parameter end");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_and_delete_booking(pool: PgPool) {
    let booker_id = booker(&pool, "12B").await;
    let slot_id = slot(&pool, 1, "08:00", "10:00").await;
    let id = create_id(
        build_test_app(pool.clone()),
        "/api/v1/bookings",
        json!({"book_date": "2024-03-05", "slot_id": slot_id, "booker_id": booker_id}),
    )
    .await;

    let response = get(build_test_app(pool.clone()), &format!("/api/v1/bookings/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], id);

    let response = delete(build_test_app(pool.clone()), &format!("/api/v1/bookings/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool), &format!("/api/v1/bookings/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upcoming_bookings_of_booker(pool: PgPool) {
    let booker_id = booker(&pool, "12B").await;
    // A week apart, so both dates share a weekday.
    let (past, weekday) = days_from_today(-7);
    let (future, _) = days_from_today(7);
    let slot_id = slot(&pool, weekday, "08:00", "10:00").await;

    for date in [past, future] {
        create_id(
            build_test_app(pool.clone()),
            "/api/v1/bookings",
            booking_body(date, slot_id, booker_id),
        )
        .await;
    }

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/bookers/{booker_id}/bookings"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let bookings = json.as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["date"], future.format("%Y-%m-%d").to_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_numeric_booker_filter_is_json_bad_request(pool: PgPool) {
    let response = get(
        build_test_app(pool),
        "/api/v1/bookings?start=2024-03-04&end=2024-03-10&booker_id=abc",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["content-type"], "application/json");

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["status"], 400);
}
