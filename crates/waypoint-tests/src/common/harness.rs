// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Harness
//!
//! [`TestApp`] owns a fully wired router over a fresh in-memory store and
//! sends requests to it in-process. Every test gets its own store.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use waypoint_api::{AppState, router};
use waypoint_core::service::RegisterEmployee;
use waypoint_core::{MemoryStore, Role};

use super::fixtures::{TEST_PASSWORD, email_for, register_body, test_config, travel_body};

// =============================================================================
// TestResponse
// =============================================================================

/// A buffered response.
#[derive(Debug, Clone)]
pub struct TestResponse {
    /// Status code.
    pub status: StatusCode,
    /// JSON body, `Value::Null` when empty.
    pub body: Value,
}

impl TestResponse {
    /// Returns `body["errorCode"]` as a string, if present.
    pub fn error_code(&self) -> Option<&str> {
        self.body.get("errorCode").and_then(Value::as_str)
    }

    /// Returns `body["id"]` as an integer.
    pub fn id(&self) -> i64 {
        self.body["id"]
            .as_i64()
            .unwrap_or_else(|| panic!("response has no id: {}", self.body))
    }
}

// =============================================================================
// TestApp
// =============================================================================

/// In-process application under test.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
    /// Shared state, for direct access to services and the codec.
    pub state: AppState,
}

impl TestApp {
    /// Builds the application over an empty store.
    pub fn new() -> Self {
        let state = AppState::new(Arc::new(test_config()), Arc::new(MemoryStore::new()))
            .expect("test state");
        Self {
            router: router(state.clone()),
            state,
        }
    }

    /// Returns a clone of the router, for spawning concurrent requests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Sends a request and buffers the JSON response.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        send(self.router.clone(), method, uri, token, body).await
    }

    /// GET.
    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    /// POST with a JSON body.
    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    /// PUT with a JSON body.
    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    /// PATCH with a JSON body.
    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PATCH, uri, token, Some(body)).await
    }

    /// DELETE.
    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Logs in and returns the bearer token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/auth/login", None, json!({ "email": email, "password": password }))
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response.body["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }

    /// Registers a regular employee through the API and logs in.
    pub async fn user(&self, username: &str) -> (i64, String) {
        let response = self.post("/auth/register", None, register_body(username)).await;
        assert_eq!(response.status, StatusCode::CREATED, "register failed: {}", response.body);
        let token = self.login(&email_for(username), TEST_PASSWORD).await;
        (response.id(), token)
    }

    /// Creates an administrator directly through the service and logs in.
    pub async fn admin(&self) -> (i64, String) {
        self.admin_named("admin").await
    }

    /// Like [`admin`](Self::admin) with a chosen username.
    pub async fn admin_named(&self, username: &str) -> (i64, String) {
        let form = RegisterEmployee {
            username: username.into(),
            name: "Test".into(),
            surname: "Admin".into(),
            email: email_for(username),
            password: TEST_PASSWORD.into(),
        };
        let employee = self
            .state
            .services
            .employees
            .register(form, Role::Admin)
            .await
            .expect("admin registration");
        let token = self.login(&email_for(username), TEST_PASSWORD).await;
        (employee.id.get(), token)
    }

    /// Creates a travel as `admin_token` and returns its id.
    pub async fn travel(&self, admin_token: &str, destination: &str, date: chrono::NaiveDate) -> i64 {
        let response = self
            .post("/api/travels", Some(admin_token), travel_body(destination, date))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "travel failed: {}", response.body);
        response.id()
    }

    /// Books `travel_id` with `token`, optionally naming the employee.
    pub async fn book(&self, token: &str, employee_id: Option<i64>, travel_id: i64) -> TestResponse {
        let mut body = json!({ "travelId": travel_id });
        if let Some(employee_id) = employee_id {
            body["employeeId"] = json!(employee_id);
        }
        self.post("/api/bookings", Some(token), body).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Sends one request through `router` and buffers the response.
pub async fn send(
    router: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = router.oneshot(request).await.expect("infallible router");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    TestResponse { status, body }
}
