//! Router-level checks for requests that are answered before any query runs.

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use slotbook_api::build_router;

use crate::test_utils::TestContext;

fn server() -> TestServer {
    let ctx = TestContext::new();
    TestServer::new(build_router(ctx.build_state())).expect("test server")
}

fn error_message(body: &Value) -> &str {
    body["error"].as_str().unwrap_or_default()
}

fn profile_body(slots: Value, sub_slot_count: u32) -> Value {
    json!({
        "profile_name": "Mornings",
        "clinic_ids": ["clinic-a"],
        "clinic_work_period": { "start": "08:00 AM", "end": "12:00 PM" },
        "appointments_per_slot": 2,
        "sub_slot_count": sub_slot_count,
        "expires_at": "2024-12-31T00:00:00Z",
        "cancel_period": 24,
        "slots": slots
    })
}

#[tokio::test]
async fn test_health() {
    let response = server().get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_version() {
    let response = server().get("/version").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({ "version": env!("CARGO_PKG_VERSION") })
    );
}

#[tokio::test]
async fn test_availability_malformed_date() {
    let response = server()
        .get("/api/doctors/doctor-1/availability")
        .add_query_param("date", "05/01/2024")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(error_message(&response.json::<Value>()).contains("YYYY-MM-DD"));
}

#[tokio::test]
async fn test_availability_requires_date() {
    let response = server().get("/api/doctors/doctor-1/availability").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_availability_rejects_non_uuid_profile() {
    let response = server()
        .get("/api/doctors/doctor-1/availability")
        .add_query_param("date", "2024-05-01")
        .add_query_param("profile_id", "mornings")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_profile_with_indivisible_slot() {
    let body = profile_body(json!([{ "start": "09:00 AM", "end": "10:15 AM" }]), 2);

    let response = server()
        .post("/api/doctors/doctor-1/profiles")
        .json(&body)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(error_message(&response.json::<Value>()).starts_with("Invalid template"));
}

#[tokio::test]
async fn test_create_profile_with_uneven_sub_slot_count() {
    let body = profile_body(json!([{ "start": "09:00 AM", "end": "10:00 AM" }]), 7);

    let response = server()
        .post("/api/doctors/doctor-1/profiles")
        .json(&body)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_profile_with_unpadded_time_label() {
    let body = profile_body(json!([{ "start": "9:00 AM", "end": "10:00 AM" }]), 2);

    let response = server()
        .post("/api/doctors/doctor-1/profiles")
        .json(&body)
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_book_with_malformed_date() {
    let body = json!({
        "profile_id": "6f1c2a8e-2d1b-4a57-9a0e-1f7c3b9d4e21",
        "doctor_id": "doctor-1",
        "clinic_id": "clinic-a",
        "appointment_date": "2024-5-1",
        "appointment_time": { "start": "09:00 AM", "end": "09:30 AM" }
    });

    let response = server()
        .post("/api/patients/patient-1/appointments")
        .json(&body)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(error_message(&response.json::<Value>()).contains("YYYY-MM-DD"));
}

#[tokio::test]
async fn test_book_with_inverted_window() {
    let body = json!({
        "profile_id": "6f1c2a8e-2d1b-4a57-9a0e-1f7c3b9d4e21",
        "doctor_id": "doctor-1",
        "clinic_id": "clinic-a",
        "appointment_date": "2024-05-01",
        "appointment_time": { "start": "09:30 AM", "end": "09:00 AM" }
    });

    let response = server()
        .post("/api/patients/patient-1/appointments")
        .json(&body)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
