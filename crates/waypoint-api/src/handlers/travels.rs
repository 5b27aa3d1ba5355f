// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Travel handlers.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;

use waypoint_core::service::TravelInput;
use waypoint_core::{CoreError, TravelId, TravelStatus};

use crate::error::ApiResult;
use crate::extractors::{IdPath, Pagination, ValidatedJson};
use crate::response::{PageResponse, TravelResponse};
use crate::state::AppState;

/// Status change body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusRequest {
    /// New status.
    pub status: Option<TravelStatus>,
}

/// GET /api/travels
pub async fn list(
    State(state): State<AppState>,
    Pagination(page): Pagination,
) -> ApiResult<impl IntoResponse> {
    let page = state.services.travels.list(page).await?;
    Ok(Json(PageResponse::from_page(page, TravelResponse::from)))
}

/// GET /api/travels/{id}
pub async fn get(
    State(state): State<AppState>,
    IdPath(id): IdPath<TravelId>,
) -> ApiResult<impl IntoResponse> {
    let travel = state.services.travels.get(id).await?;
    Ok(Json(TravelResponse::from(travel)))
}

/// POST /api/travels
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<TravelInput>,
) -> ApiResult<impl IntoResponse> {
    let travel = state.services.travels.create(input).await?;
    Ok((StatusCode::CREATED, Json(TravelResponse::from(travel))))
}

/// PUT /api/travels/{id}
///
/// Moving the date is refused with 409 when it would double-book anyone.
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath<TravelId>,
    ValidatedJson(input): ValidatedJson<TravelInput>,
) -> ApiResult<impl IntoResponse> {
    let travel = state.services.travels.update(id, input).await?;
    Ok(Json(TravelResponse::from(travel)))
}

/// PATCH /api/travels/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    IdPath(id): IdPath<TravelId>,
    ValidatedJson(request): ValidatedJson<StatusRequest>,
) -> ApiResult<impl IntoResponse> {
    let status = request
        .status
        .ok_or_else(|| CoreError::invalid_field("status", "status is required"))?;
    let travel = state.services.travels.set_status(id, status).await?;
    Ok(Json(TravelResponse::from(travel)))
}

/// DELETE /api/travels/{id}
pub async fn delete(
    State(state): State<AppState>,
    IdPath(id): IdPath<TravelId>,
) -> ApiResult<impl IntoResponse> {
    state.services.travels.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
