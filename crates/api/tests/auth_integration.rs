//! Integration tests for the identity flows: verify-id, OTP, signup and login.
//!
//! Run with: cargo test --test auth_integration

mod common;

use axum::http::{Method, StatusCode};
use campus_events_api::app::Stores;
use common::{
    create_in_memory_app, create_test_app, get_request, json_request, parse_response_body,
    test_config,
};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send(app: &axum::Router, request: axum::http::Request<axum::body::Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, parse_response_body(response).await)
}

async fn allow_list(app: &axum::Router, list: &str, external_id: &str, email: &str) {
    let (status, _) = send(
        app,
        json_request(
            Method::POST,
            &format!("/api/allow-list/{}", list),
            json!({ "externalId": external_id, "email": email }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn sign_up(app: &axum::Router, external_id: &str, secret: &str) -> (StatusCode, Value) {
    send(
        app,
        json_request(
            Method::POST,
            "/register",
            json!({
                "externalId": external_id,
                "secret": secret,
                "name": "Asha Rao",
                "department": "CSE",
                "yearOfStudy": 2
            }),
        ),
    )
    .await
}

// ============================================================================
// End-to-end
// ============================================================================

#[tokio::test]
async fn test_student_allow_list_to_login() {
    let (app, _) = create_in_memory_app();

    allow_list(&app, "students", "SFA001", "a@x.com").await;

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/verify-id", json!({ "externalId": "sfa001" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "allowed");
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["role"], "student");

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/register",
            json!({
                "externalId": "SFA001",
                "secret": "p@ss",
                "role": "student",
                "name": "Asha Rao"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["userId"].is_string());

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/verify-id", json!({ "externalId": "SFA001" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "registered");

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/login",
            json!({ "externalId": "SFA001", "secret": "p@ss" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["externalId"], "SFA001");
    assert_eq!(body["user"]["role"], "student");
    assert!(body["user"].get("secret").is_none());
    assert!(body["user"].get("secretHash").is_none());
}

// ============================================================================
// verify-id
// ============================================================================

#[tokio::test]
async fn test_verify_id_registered_wins_over_allow_list() {
    let (app, _) = create_in_memory_app();
    allow_list(&app, "teachers", "AED010", "t@x.com").await;
    let (status, _) = sign_up(&app, "AED010", "secret-1").await;
    assert_eq!(status, StatusCode::CREATED);

    // Removing the allow-list entry does not change the outcome.
    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method(Method::DELETE)
                .uri("/api/allow-list/teachers/AED010")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/verify-id", json!({ "externalId": "aed010" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "registered");
    assert_eq!(body["role"], "teacher");
}

#[tokio::test]
async fn test_verify_id_absent_known_prefix_is_not_found() {
    let (app, _) = create_in_memory_app();

    for id in ["SFA404", "AED404", "ADMIN404"] {
        let (status, body) = send(
            &app,
            json_request(Method::POST, "/verify-id", json!({ "externalId": id })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", id);
        assert_eq!(body["success"], false);
    }
}

#[tokio::test]
async fn test_verify_id_unknown_prefix_is_bad_request() {
    let (app, _) = create_in_memory_app();

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/verify-id", json!({ "externalId": "XYZ001" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid ID format");
}

#[tokio::test]
async fn test_verify_id_missing_id_is_bad_request() {
    let (app, _) = create_in_memory_app();

    let (status, _) = send(&app, json_request(Method::POST, "/verify-id", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_verify_id_malformed_json_is_bad_request() {
    let (app, _) = create_in_memory_app();

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/verify-id")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

// ============================================================================
// OTP
// ============================================================================

#[tokio::test]
async fn test_otp_round_trip_consumes_code() {
    let (app, _) = create_in_memory_app();

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/send-otp", json!({ "externalId": "sfa001" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["expiresInSecs"], 300);
    let code = body["code"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 6);

    let verify = json!({ "externalId": "SFA001", "otp": code });

    let (status, body) = send(&app, json_request(Method::POST, "/verify-otp", verify.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "OTP verified successfully");

    let (status, _) = send(&app, json_request(Method::POST, "/verify-otp", verify)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_otp_wrong_code_is_bad_request_and_keeps_code() {
    let (app, _) = create_in_memory_app();

    let (_, body) = send(
        &app,
        json_request(Method::POST, "/send-otp", json!({ "externalId": "SFA002" })),
    )
    .await;
    let code = body["code"].as_str().unwrap().to_string();
    let wrong = if code == "123456" { "654321" } else { "123456" };

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/verify-otp",
            json!({ "externalId": "SFA002", "code": wrong }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid OTP");

    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/verify-otp",
            json!({ "externalId": "SFA002", "code": code }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_verify_otp_without_request_is_not_found() {
    let (app, _) = create_in_memory_app();

    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/verify-otp",
            json!({ "externalId": "SFA003", "code": "123456" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Signup
// ============================================================================

#[tokio::test]
async fn test_register_requires_allow_list_entry() {
    let (app, _) = create_in_memory_app();

    let (status, _) = sign_up(&app, "SFA100", "p@ss").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_twice_is_conflict() {
    let (app, _) = create_in_memory_app();
    allow_list(&app, "students", "SFA101", "b@x.com").await;

    let (status, _) = sign_up(&app, "SFA101", "p@ss").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = sign_up(&app, "sfa101", "p@ss").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn test_register_admin_id_is_rejected() {
    let (app, _) = create_in_memory_app();
    allow_list(&app, "admins", "ADMIN002", "ops@x.com").await;

    let (status, _) = sign_up(&app, "ADMIN002", "p@ss").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_wrong_secret_matches_unknown_user() {
    let (app, _) = create_in_memory_app();
    allow_list(&app, "students", "SFA200", "c@x.com").await;
    let (status, _) = sign_up(&app, "SFA200", "right-secret").await;
    assert_eq!(status, StatusCode::CREATED);

    let (wrong_status, wrong_body) = send(
        &app,
        json_request(
            Method::POST,
            "/login",
            json!({ "externalId": "SFA200", "secret": "wrong-secret" }),
        ),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        &app,
        json_request(
            Method::POST,
            "/login",
            json!({ "externalId": "SFA999", "secret": "wrong-secret" }),
        ),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn test_login_admin_without_secret_is_unauthorized() {
    let (app, _) = create_in_memory_app();
    allow_list(&app, "admins", "ADMIN001", "admin@x.com").await;

    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/login",
            json!({ "externalId": "ADMIN001", "secret": "anything" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn test_lookup_user_by_external_id() {
    let (app, _) = create_in_memory_app();
    allow_list(&app, "students", "SFA300", "d@x.com").await;
    let (_, body) = sign_up(&app, "SFA300", "p@ss").await;
    let user_id = body["userId"].as_str().unwrap().to_string();

    let (status, body) = send(&app, get_request("/api/users/lookup/sfa300")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["externalId"], "SFA300");
    assert_eq!(body["name"], "Asha Rao");
    assert_eq!(body["department"], "CSE");

    let (status, body) = send(&app, get_request(&format!("/api/users/{}", user_id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["externalId"], "SFA300");

    let (status, _) = send(&app, get_request("/api/users/lookup/SFA301")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Allow-lists
// ============================================================================

#[tokio::test]
async fn test_allow_list_rejects_mismatched_prefix() {
    let (app, _) = create_in_memory_app();

    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/allow-list/teachers",
            json!({ "externalId": "SFA001", "email": "a@x.com" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_allow_list_duplicate_and_listing() {
    let (app, _) = create_in_memory_app();
    allow_list(&app, "students", "SFA400", "e@x.com").await;

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/allow-list/students",
            json!({ "externalId": "sfa400", "email": "other@x.com" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "conflict");

    let (status, body) = send(&app, get_request("/api/allow-list/students")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["externalId"], "SFA400");
}

#[tokio::test]
async fn test_allow_list_update_missing_entry_is_not_found() {
    let (app, _) = create_in_memory_app();

    let (status, body) = send(
        &app,
        json_request(
            Method::PUT,
            "/api/allow-list/students/SFA500",
            json!({ "email": "f@x.com" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Student ID not found in records");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let (app, _) = create_in_memory_app();

    let request = axum::http::Request::builder()
        .method(Method::GET)
        .uri("/api/health/live")
        .header("x-request-id", "trace-abc")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "trace-abc");
}

#[tokio::test]
async fn test_auth_rate_limit_ignores_forwarded_for_rotation() {
    let mut config = test_config();
    config.security.auth_rate_limit_per_minute = 2;
    let app = create_test_app(config, Stores::in_memory());

    let mut statuses = Vec::new();
    for i in 0..4 {
        let mut request = json_request(Method::POST, "/verify-id", json!({ "externalId": "XYZ1" }));
        request.headers_mut().insert(
            "x-forwarded-for",
            format!("198.51.100.{}", i).parse().unwrap(),
        );
        let (status, _) = send(&app, request).await;
        statuses.push(status);
    }

    assert_eq!(statuses[0], StatusCode::BAD_REQUEST);
    assert_eq!(statuses[1], StatusCode::BAD_REQUEST);
    assert_eq!(statuses[2], StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(statuses[3], StatusCode::TOO_MANY_REQUESTS);
}
