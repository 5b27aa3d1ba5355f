// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Booking handlers.

use axum::{
    Json,
    extract::State,
    http::{Method, StatusCode},
    response::IntoResponse,
};

use waypoint_core::BookingId;
use waypoint_core::service::BookingRequest;

use crate::auth::evaluate;
use crate::error::ApiResult;
use crate::extractors::{Auth, IdPath, Pagination, ValidatedJson};
use crate::response::{BookingResponse, PageResponse};
use crate::routes;
use crate::state::AppState;

/// GET /api/bookings
pub async fn list(
    State(state): State<AppState>,
    Pagination(page): Pagination,
) -> ApiResult<impl IntoResponse> {
    let page = state.services.bookings.list(page).await?;
    Ok(Json(PageResponse::from_page(page, BookingResponse::from)))
}

/// POST /api/bookings
///
/// A non-admin caller always books for itself; `employeeId` in the body is
/// only honored for administrators.
pub async fn create(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    ValidatedJson(request): ValidatedJson<BookingRequest>,
) -> ApiResult<impl IntoResponse> {
    let details = state
        .services
        .bookings
        .create(&ctx.principal, request)
        .await?;

    Ok((StatusCode::CREATED, Json(BookingResponse::from(details))))
}

/// GET /api/bookings/me
pub async fn mine(State(state): State<AppState>, Auth(ctx): Auth) -> ApiResult<impl IntoResponse> {
    let bookings = state
        .services
        .bookings
        .list_for_employee(ctx.employee_id())
        .await?;
    Ok(Json(
        bookings
            .into_iter()
            .map(BookingResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/bookings/{id}
///
/// The owner is only known once the booking is loaded, so the policy is
/// evaluated here rather than in the middleware.
pub async fn get(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    IdPath(id): IdPath<BookingId>,
) -> ApiResult<impl IntoResponse> {
    let booking = state.services.bookings.get(id).await?;

    let access = state.policy.access_for(&Method::GET, routes::BOOKING);
    evaluate(access, Some(&ctx.principal), Some(booking.employee_id))?;

    let details = state.services.bookings.details(booking).await?;
    Ok(Json(BookingResponse::from(details)))
}
