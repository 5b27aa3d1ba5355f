// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Employee handlers.
//!
//! The `/me` variants take the owner from the authenticated principal and
//! never read an id from the request.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;

use waypoint_core::service::{RegisterEmployee, UpdateEmployee};
use waypoint_core::{CoreError, EmployeeId, Role};

use crate::error::ApiResult;
use crate::extractors::{Auth, IdPath, Pagination, ValidatedJson};
use crate::response::{BookingResponse, EmployeeResponse, PageResponse};
use crate::state::AppState;

// =============================================================================
// Request bodies
// =============================================================================

/// Admin account creation body: a registration form plus an optional role.
#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    /// Account fields.
    #[serde(flatten)]
    pub account: RegisterEmployee,
    /// Role; `USER` when omitted.
    #[serde(default)]
    pub role: Option<Role>,
}

/// Avatar update body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AvatarRequest {
    /// Image URL.
    pub avatar_url: String,
}

/// Role change body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RoleRequest {
    /// New role.
    pub role: Option<Role>,
}

// =============================================================================
// Collection
// =============================================================================

/// GET /api/employees
pub async fn list(
    State(state): State<AppState>,
    Pagination(page): Pagination,
) -> ApiResult<impl IntoResponse> {
    let page = state.services.employees.list(page).await?;
    Ok(Json(PageResponse::from_page(page, EmployeeResponse::from)))
}

/// POST /api/employees
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateEmployeeRequest>,
) -> ApiResult<impl IntoResponse> {
    let employee = state
        .services
        .employees
        .register(request.account, request.role.unwrap_or_default())
        .await?;

    Ok((StatusCode::CREATED, Json(EmployeeResponse::from(employee))))
}

// =============================================================================
// Me
// =============================================================================

/// GET /api/employees/me
pub async fn me(State(state): State<AppState>, Auth(ctx): Auth) -> ApiResult<impl IntoResponse> {
    let employee = state.services.employees.get(ctx.employee_id()).await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

/// PUT /api/employees/me
pub async fn update_me(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    ValidatedJson(request): ValidatedJson<UpdateEmployee>,
) -> ApiResult<impl IntoResponse> {
    let employee = state
        .services
        .employees
        .update(ctx.employee_id(), request)
        .await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

/// PUT /api/employees/me/avatar
pub async fn update_my_avatar(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    ValidatedJson(request): ValidatedJson<AvatarRequest>,
) -> ApiResult<impl IntoResponse> {
    let employee = state
        .services
        .employees
        .set_avatar(ctx.employee_id(), request.avatar_url.trim())
        .await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

// =============================================================================
// By id
// =============================================================================

/// GET /api/employees/{id}
pub async fn get(
    State(state): State<AppState>,
    IdPath(id): IdPath<EmployeeId>,
) -> ApiResult<impl IntoResponse> {
    let employee = state.services.employees.get(id).await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

/// PUT /api/employees/{id}
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath<EmployeeId>,
    ValidatedJson(request): ValidatedJson<UpdateEmployee>,
) -> ApiResult<impl IntoResponse> {
    let employee = state.services.employees.update(id, request).await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

/// DELETE /api/employees/{id}
pub async fn delete(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    IdPath(id): IdPath<EmployeeId>,
) -> ApiResult<impl IntoResponse> {
    state.services.employees.delete(id).await?;
    tracing::info!(employee_id = %id, by = %ctx.employee_id(), "Employee removed");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/employees/{id}/avatar
pub async fn update_avatar(
    State(state): State<AppState>,
    IdPath(id): IdPath<EmployeeId>,
    ValidatedJson(request): ValidatedJson<AvatarRequest>,
) -> ApiResult<impl IntoResponse> {
    let employee = state
        .services
        .employees
        .set_avatar(id, request.avatar_url.trim())
        .await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

/// PUT /api/employees/{id}/role
pub async fn update_role(
    State(state): State<AppState>,
    IdPath(id): IdPath<EmployeeId>,
    ValidatedJson(request): ValidatedJson<RoleRequest>,
) -> ApiResult<impl IntoResponse> {
    let role = request
        .role
        .ok_or_else(|| CoreError::invalid_field("role", "role is required"))?;
    let employee = state.services.employees.set_role(id, role).await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

/// GET /api/employees/{id}/bookings
pub async fn bookings(
    State(state): State<AppState>,
    IdPath(id): IdPath<EmployeeId>,
) -> ApiResult<impl IntoResponse> {
    let bookings = state.services.bookings.list_for_employee(id).await?;
    Ok(Json(
        bookings
            .into_iter()
            .map(BookingResponse::from)
            .collect::<Vec<_>>(),
    ))
}
