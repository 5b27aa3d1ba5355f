// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # API Integration Tests
//!
//! Drives the full request pipeline through the router.
//!
//! ## Test Categories
//!
//! - `test_auth_*`: token issuance and the authentication gate
//! - `test_policy_*`: per-route authorization
//! - `test_booking_*`: booking creation and the conflict guard
//! - `test_employee_*`: employee lifecycle
//! - `test_error_*`: problem bodies and validation

use waypoint_api::TokenCodec;
use waypoint_api::auth::DisplayClaims;
use waypoint_core::EmployeeId;
use waypoint_tests::prelude::*;

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_auth_health_is_public() {
    let app = TestApp::new();
    let response = app.get("/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_auth_login_returns_bearer_token() {
    let app = TestApp::new();
    app.user("lbianchi").await;

    let response = app
        .post(
            "/auth/login",
            None,
            json!({ "email": email_for("lbianchi"), "password": TEST_PASSWORD }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["tokenType"], "Bearer");
    let expires_in = response.body["expiresIn"].as_i64().unwrap();
    assert!((3590..=3600).contains(&expires_in));
    assert_eq!(
        response.body["token"].as_str().unwrap().split('.').count(),
        3
    );
}

#[tokio::test]
async fn test_auth_token_carries_identity_only() {
    let app = TestApp::new();
    let (id, token) = app.user("lbianchi").await;

    let verified = app.state.codec().verify(&token).unwrap();
    assert_eq!(verified.subject, EmployeeId::new(id));

    let claims = serde_json::to_value(&verified.claims).unwrap();
    let object = claims.as_object().unwrap();
    assert!(!object.contains_key("role"));
    assert!(!object.contains_key("password"));
    assert!(!claims.to_string().contains(TEST_PASSWORD));
    assert_eq!(claims["username"], "lbianchi");
}

#[tokio::test]
async fn test_auth_wrong_password() {
    let app = TestApp::new();
    app.user("lbianchi").await;

    let wrong = app
        .post(
            "/auth/login",
            None,
            json!({ "email": email_for("lbianchi"), "password": "Wrong1pass" }),
        )
        .await;
    let unknown = app
        .post(
            "/auth/login",
            None,
            json!({ "email": "nobody@example.com", "password": TEST_PASSWORD }),
        )
        .await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.error_code(), Some("INVALID_CREDENTIALS"));
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body["detail"], wrong.body["detail"]);
}

#[tokio::test]
async fn test_auth_missing_token() {
    let app = TestApp::new();
    let response = app.get("/api/travels", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), Some("MISSING_TOKEN"));
    assert_eq!(response.body["path"], "/api/travels");
}

#[tokio::test]
async fn test_auth_invalid_token() {
    let app = TestApp::new();

    let garbage = app.get("/api/travels", Some("not.a.token")).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.error_code(), Some("INVALID_TOKEN"));

    // Signed with a different secret.
    let (id, _) = app.user("lbianchi").await;
    let foreign = TokenCodec::new(
        "some-other-secret-that-is-also-long-enough",
        "waypoint",
        std::time::Duration::from_secs(3600),
        0,
    )
    .unwrap()
    .issue(EmployeeId::new(id), DisplayClaims::default())
    .unwrap();
    let response = app.get("/api/travels", Some(&foreign.token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), Some("INVALID_TOKEN"));
}

#[tokio::test]
async fn test_auth_expired_token() {
    let app = TestApp::new();
    let (id, _) = app.user("lbianchi").await;

    let issued_at = chrono::Utc::now() - chrono::Duration::hours(2);
    let expired = app
        .state
        .codec()
        .issue_at(EmployeeId::new(id), DisplayClaims::default(), issued_at)
        .unwrap();

    let response = app.get("/api/employees/me", Some(&expired.token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), Some("INVALID_TOKEN"));
}

#[tokio::test]
async fn test_auth_deleted_employee_token_rejected() {
    let app = TestApp::new();
    let (_, admin) = app.admin().await;
    let (id, token) = app.user("lbianchi").await;

    assert_eq!(app.get("/api/employees/me", Some(&token)).await.status, StatusCode::OK);

    let deleted = app.delete(&format!("/api/employees/{}", id), Some(&admin)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let response = app.get("/api/employees/me", Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), Some("INVALID_TOKEN"));
}

#[tokio::test]
async fn test_auth_role_change_applies_to_existing_token() {
    let app = TestApp::new();
    let (_, admin) = app.admin().await;
    let (id, token) = app.user("lbianchi").await;

    assert_eq!(app.get("/api/bookings", Some(&token)).await.status, StatusCode::FORBIDDEN);

    let promoted = app
        .put(&format!("/api/employees/{}/role", id), Some(&admin), json!({ "role": "ADMIN" }))
        .await;
    assert_eq!(promoted.status, StatusCode::OK);
    assert_eq!(promoted.body["role"], "ADMIN");

    // Same token, no re-login.
    assert_eq!(app.get("/api/bookings", Some(&token)).await.status, StatusCode::OK);

    let demoted = app
        .put(&format!("/api/employees/{}/role", id), Some(&admin), json!({ "role": "USER" }))
        .await;
    assert_eq!(demoted.status, StatusCode::OK);
    assert_eq!(app.get("/api/bookings", Some(&token)).await.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_auth_register_hides_hash() {
    let app = TestApp::new();
    let response = app.post("/auth/register", None, register_body("gverdi")).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["role"], "USER");
    let text = response.body.to_string();
    assert!(!text.contains("password"));
    assert!(!text.contains("$2"));
}

// =============================================================================
// Policy
// =============================================================================

#[tokio::test]
async fn test_policy_admin_only_routes() {
    let app = TestApp::new();
    let (_, admin) = app.admin().await;
    let (_, user) = app.user("lbianchi").await;

    for uri in ["/api/employees", "/api/bookings"] {
        assert_eq!(app.get(uri, Some(&user)).await.status, StatusCode::FORBIDDEN, "{}", uri);
        assert_eq!(app.get(uri, Some(&admin)).await.status, StatusCode::OK, "{}", uri);
    }

    let response = app
        .post("/api/travels", Some(&user), travel_body("Milano", base_date()))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_policy_owner_routes() {
    let app = TestApp::new();
    let (_, admin) = app.admin().await;
    let (me, user) = app.user("lbianchi").await;
    let (other, _) = app.user("gverdi").await;

    let own = app.get(&format!("/api/employees/{}", me), Some(&user)).await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.body["username"], "lbianchi");

    let foreign = app.get(&format!("/api/employees/{}", other), Some(&user)).await;
    assert_eq!(foreign.status, StatusCode::FORBIDDEN);

    let foreign_bookings = app
        .get(&format!("/api/employees/{}/bookings", other), Some(&user))
        .await;
    assert_eq!(foreign_bookings.status, StatusCode::FORBIDDEN);

    let as_admin = app
        .get(&format!("/api/employees/{}/bookings", other), Some(&admin))
        .await;
    assert_eq!(as_admin.status, StatusCode::OK);
    assert_eq!(as_admin.body, json!([]));
}

#[tokio::test]
async fn test_policy_user_cannot_change_own_role() {
    let app = TestApp::new();
    let (me, user) = app.user("lbianchi").await;

    let response = app
        .put(&format!("/api/employees/{}/role", me), Some(&user), json!({ "role": "ADMIN" }))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let profile = app.get("/api/employees/me", Some(&user)).await;
    assert_eq!(profile.body["role"], "USER");
}

#[tokio::test]
async fn test_policy_booking_owner_or_admin() {
    let app = TestApp::new();
    let (_, admin) = app.admin().await;
    let (_, owner) = app.user("lbianchi").await;
    let (_, stranger) = app.user("gverdi").await;
    let travel = app.travel(&admin, "Milano", base_date()).await;

    let booking = app.book(&owner, None, travel).await;
    assert_eq!(booking.status, StatusCode::CREATED);
    let uri = format!("/api/bookings/{}", booking.id());

    assert_eq!(app.get(&uri, Some(&owner)).await.status, StatusCode::OK);
    assert_eq!(app.get(&uri, Some(&admin)).await.status, StatusCode::OK);
    assert_eq!(app.get(&uri, Some(&stranger)).await.status, StatusCode::FORBIDDEN);
    assert_eq!(
        app.get("/api/bookings/9999", Some(&owner)).await.status,
        StatusCode::NOT_FOUND
    );
}

// =============================================================================
// Bookings
// =============================================================================

#[tokio::test]
async fn test_booking_user_books_for_self() {
    let app = TestApp::new();
    let (_, admin) = app.admin().await;
    let (me, user) = app.user("lbianchi").await;
    let (other, _) = app.user("gverdi").await;
    let travel = app.travel(&admin, "Milano", base_date()).await;

    // employeeId naming someone else is ignored for non-admins.
    let response = app.book(&user, Some(other), travel).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["employee"]["id"], me);
    assert_eq!(response.body["travel"]["id"], travel);

    let theirs = app
        .get(&format!("/api/employees/{}/bookings", other), Some(&admin))
        .await;
    assert_eq!(theirs.body, json!([]));

    let mine = app.get("/api/bookings/me", Some(&user)).await;
    assert_eq!(mine.status, StatusCode::OK);
    assert_eq!(mine.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_booking_admin_books_for_employee() {
    let app = TestApp::new();
    let (_, admin) = app.admin().await;
    let (employee, _) = app.user("lbianchi").await;
    let travel = app.travel(&admin, "Roma", base_date()).await;

    let missing = app.book(&admin, None, travel).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body["validationErrors"][0]["field"], "employeeId");

    let response = app.book(&admin, Some(employee), travel).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["employee"]["id"], employee);
    assert_eq!(response.body["employee"]["username"], "lbianchi");
}

#[tokio::test]
async fn test_booking_same_day_conflict() {
    let app = TestApp::new();
    let (_, admin) = app.admin().await;
    let (_, first) = app.user("lbianchi").await;
    let (_, second) = app.user("gverdi").await;
    let milano = app.travel(&admin, "Milano", base_date()).await;
    let roma = app.travel(&admin, "Roma", base_date()).await;
    let torino = app.travel(&admin, "Torino", date_after(1)).await;

    assert_eq!(app.book(&first, None, milano).await.status, StatusCode::CREATED);

    let same_travel = app.book(&first, None, milano).await;
    assert_eq!(same_travel.status, StatusCode::CONFLICT);

    let same_day = app.book(&first, None, roma).await;
    assert_eq!(same_day.status, StatusCode::CONFLICT);

    assert_eq!(app.book(&first, None, torino).await.status, StatusCode::CREATED);
    assert_eq!(app.book(&second, None, milano).await.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_booking_unknown_travel() {
    let app = TestApp::new();
    let (_, user) = app.user("lbianchi").await;

    let response = app.book(&user, None, 4242).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_booking_concurrent_requests_create_one() {
    const ATTEMPTS: usize = 16;

    let app = TestApp::new();
    let (_, admin) = app.admin().await;
    let (_, user) = app.user("lbianchi").await;
    let travel = app.travel(&admin, "Milano", base_date()).await;

    let mut handles = Vec::with_capacity(ATTEMPTS);
    for _ in 0..ATTEMPTS {
        let router = app.router();
        let token = user.clone();
        handles.push(tokio::spawn(async move {
            send(
                router,
                Method::POST,
                "/api/bookings",
                Some(&token),
                Some(json!({ "travelId": travel })),
            )
            .await
            .status
        }));
    }

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status {}", other),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, ATTEMPTS - 1);

    let mine = app.get("/api/bookings/me", Some(&user)).await;
    assert_eq!(mine.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_booking_list_is_paged() {
    let app = TestApp::new();
    let (_, admin) = app.admin().await;
    let (_, user) = app.user("lbianchi").await;
    for day in 0..3 {
        let travel = app.travel(&admin, "Milano", date_after(day)).await;
        assert_eq!(app.book(&user, None, travel).await.status, StatusCode::CREATED);
    }

    let response = app.get("/api/bookings?page=1&perPage=2", Some(&admin)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total"], 3);
    assert_eq!(response.body["totalPages"], 2);
    assert_eq!(response.body["items"].as_array().unwrap().len(), 2);
}

// =============================================================================
// Employees and travels
// =============================================================================

#[tokio::test]
async fn test_employee_delete_with_bookings_conflicts() {
    let app = TestApp::new();
    let (_, admin) = app.admin().await;
    let (booked, user) = app.user("lbianchi").await;
    let (idle, _) = app.user("gverdi").await;
    let travel = app.travel(&admin, "Milano", base_date()).await;
    assert_eq!(app.book(&user, None, travel).await.status, StatusCode::CREATED);

    let blocked = app.delete(&format!("/api/employees/{}", booked), Some(&admin)).await;
    assert_eq!(blocked.status, StatusCode::CONFLICT);

    let removed = app.delete(&format!("/api/employees/{}", idle), Some(&admin)).await;
    assert_eq!(removed.status, StatusCode::NO_CONTENT);

    let gone = app.get(&format!("/api/employees/{}", idle), Some(&admin)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_employee_duplicate_registration() {
    let app = TestApp::new();
    app.user("lbianchi").await;

    let response = app.post("/auth/register", None, register_body("lbianchi")).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_employee_update_profile() {
    let app = TestApp::new();
    let (_, user) = app.user("lbianchi").await;

    let response = app
        .put(
            "/api/employees/me",
            Some(&user),
            json!({ "name": "Luca", "surname": "Bianchi", "email": "luca@example.com" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "luca@example.com");

    // Login follows the new email.
    app.login("luca@example.com", TEST_PASSWORD).await;
}

#[tokio::test]
async fn test_travel_status_and_delete() {
    let app = TestApp::new();
    let (_, admin) = app.admin().await;
    let (_, user) = app.user("lbianchi").await;
    let travel = app.travel(&admin, "Milano", base_date()).await;
    let uri = format!("/api/travels/{}", travel);

    let listed = app.get(&uri, Some(&user)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["status"], "SCHEDULED");

    let updated = app
        .patch(&format!("{}/status", uri), Some(&admin), json!({ "status": "COMPLETED" }))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["status"], "COMPLETED");

    assert_eq!(app.book(&user, None, travel).await.status, StatusCode::CREATED);
    assert_eq!(app.delete(&uri, Some(&admin)).await.status, StatusCode::CONFLICT);
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test]
async fn test_error_validation_lists_fields() {
    let app = TestApp::new();
    let response = app
        .post(
            "/auth/register",
            None,
            json!({ "username": "x", "name": "A", "surname": "B", "email": "nope", "password": "weak" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["status"], 400);
    let fields: Vec<&str> = response.body["validationErrors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    for field in ["username", "name", "surname", "email", "password"] {
        assert!(fields.contains(&field), "missing {}", field);
    }
}

#[tokio::test]
async fn test_error_malformed_json() {
    let app = TestApp::new();
    let (_, user) = app.user("lbianchi").await;

    let response = app
        .request(Method::POST, "/api/bookings", Some(&user), Some(json!("not an object")))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_bad_path_id() {
    let app = TestApp::new();
    let (_, admin) = app.admin().await;

    let response = app.get("/api/travels/abc", Some(&admin)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
