// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication handlers.

use std::fmt;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;

use waypoint_core::service::RegisterEmployee;
use waypoint_core::{Role, ValidationErrors};

use crate::auth::DisplayClaims;
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::response::{AuthResponse, EmployeeResponse};
use crate::state::AppState;

// =============================================================================
// Login
// =============================================================================

/// Login request body.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// POST /auth/login
///
/// Verifies credentials and returns a bearer token.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let mut errors = ValidationErrors::new();
    if request.email.trim().is_empty() {
        errors.add("email", "email is required");
    }
    if request.password.is_empty() {
        errors.add("password", "password is required");
    }
    errors.into_result()?;

    let employee = state
        .services
        .employees
        .authenticate(request.email.trim(), &request.password)
        .await?;

    let issued = state
        .codec()
        .issue(employee.id, DisplayClaims::from(&employee))?;

    tracing::info!(employee_id = %employee.id, "Employee logged in");

    Ok(Json(AuthResponse::from(issued)))
}

// =============================================================================
// Register
// =============================================================================

/// POST /auth/register
///
/// Self-registration. New accounts always get the `USER` role.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterEmployee>,
) -> ApiResult<impl IntoResponse> {
    let employee = state
        .services
        .employees
        .register(request, Role::User)
        .await?;

    Ok((StatusCode::CREATED, Json(EmployeeResponse::from(employee))))
}
