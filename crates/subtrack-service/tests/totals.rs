//! Total cost integration tests.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{server_for, BrokenStore, TestHarness, USER_A, USER_B};

#[tokio::test]
async fn total_without_filters_sums_everything() {
    let harness = TestHarness::new();
    harness.seed_example().await;

    let response = harness.server.get("/subs/total").await;

    response.assert_status_ok();
    assert_eq!(response.json::<i64>(), 350);
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn total_bounds_are_exclusive() {
    let harness = TestHarness::new();
    harness.seed_example().await;

    let response = harness
        .server
        .get("/subs/total")
        .add_query_param("start_period", "01-2024")
        .add_query_param("end_period", "03-2024")
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<i64>(), 200);
}

#[tokio::test]
async fn total_filters_by_service_name() {
    let harness = TestHarness::new();
    harness.seed_example().await;

    let response = harness
        .server
        .get("/subs/total")
        .add_query_param("service_name", "X")
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<i64>(), 150);
}

#[tokio::test]
async fn total_filters_by_user_and_service() {
    let harness = TestHarness::new();
    harness.seed_example().await;

    let response = harness
        .server
        .get("/subs/total")
        .add_query_param("user_id", USER_B)
        .add_query_param("service_name", "X")
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<i64>(), 50);
}

#[tokio::test]
async fn total_with_empty_parameters_is_unfiltered() {
    let harness = TestHarness::new();
    harness.seed_example().await;

    let response = harness
        .server
        .get("/subs/total?start_period=&end_period=&user_id=&service_name=")
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<i64>(), 350);
}

#[tokio::test]
async fn total_with_no_matches_is_zero() {
    let harness = TestHarness::new();
    harness.seed_example().await;

    let response = harness
        .server
        .get("/subs/total")
        .add_query_param("user_id", USER_A)
        .add_query_param("start_period", "12-2030")
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<i64>(), 0);
}

#[tokio::test]
async fn total_on_empty_store_is_zero() {
    let harness = TestHarness::new();

    let response = harness.server.get("/subs/total").await;

    response.assert_status_ok();
    assert_eq!(response.json::<i64>(), 0);
}

#[tokio::test]
async fn total_with_invalid_period_is_bad_request() {
    let harness = TestHarness::new();
    harness.seed_example().await;

    let response = harness
        .server
        .get("/subs/total")
        .add_query_param("start_period", "13-2024")
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_period");
}

#[tokio::test]
async fn total_with_invalid_end_period_is_bad_request() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/subs/total")
        .add_query_param("end_period", "2024-03")
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn total_store_failure_is_internal_error() {
    let server = server_for(Arc::new(BrokenStore));

    let response = server.get("/subs/total").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn invalid_period_is_reported_before_backend_failure() {
    let server = server_for(Arc::new(BrokenStore));

    let response = server
        .get("/subs/total")
        .add_query_param("start_period", "1-2024")
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn total_with_repeated_parameter_is_json_bad_request() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/subs/total?start_period=01-2024&start_period=02-2024")
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "application/json"
    );
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "bad_request");
}
