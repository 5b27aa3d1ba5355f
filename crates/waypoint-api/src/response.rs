// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API response types.
//!
//! Handlers never serialize domain records directly; every body goes through
//! one of these views so the password hash cannot leak.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use waypoint_core::service::BookingDetails;
use waypoint_core::{
    BookingId, Employee, EmployeeId, Page, Role, Travel, TravelId, TravelStatus,
};

use crate::auth::IssuedToken;

// =============================================================================
// PageResponse
// =============================================================================

/// One page of items with paging metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Page number, starting at 1.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total items.
    pub total: u64,
    /// Total pages.
    pub total_pages: u64,
}

impl<T> PageResponse<T> {
    /// Builds a response from a domain page, converting every item.
    pub fn from_page<U>(page: Page<U>, convert: impl FnMut(U) -> T) -> Self {
        let total_pages = page.total_pages();
        let request = page.request;
        let page = page.map(convert);
        Self {
            items: page.items,
            page: request.page,
            per_page: request.per_page,
            total: page.total,
            total_pages,
        }
    }
}

// =============================================================================
// Employees
// =============================================================================

/// Public view of an employee.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    /// Identifier.
    pub id: EmployeeId,
    /// Login handle.
    pub username: String,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Email address.
    pub email: String,
    /// Role.
    pub role: Role,
    /// Avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            username: employee.username,
            name: employee.name,
            surname: employee.surname,
            email: employee.email,
            role: employee.role,
            avatar_url: employee.avatar_url,
        }
    }
}

// =============================================================================
// Travels
// =============================================================================

/// Public view of a travel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelResponse {
    /// Identifier.
    pub id: TravelId,
    /// Destination city.
    pub destination: String,
    /// Calendar day.
    pub travel_date: NaiveDate,
    /// Lifecycle status.
    pub status: TravelStatus,
}

impl From<Travel> for TravelResponse {
    fn from(travel: Travel) -> Self {
        Self {
            id: travel.id,
            destination: travel.destination,
            travel_date: travel.travel_date,
            status: travel.status,
        }
    }
}

// =============================================================================
// Bookings
// =============================================================================

/// Owner summary embedded in a booking.
#[derive(Debug, Clone, Serialize)]
pub struct BookingEmployee {
    /// Identifier.
    pub id: EmployeeId,
    /// Login handle.
    pub username: String,
}

/// Travel summary embedded in a booking.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingTravel {
    /// Identifier.
    pub id: TravelId,
    /// Destination city.
    pub destination: String,
    /// Calendar day.
    pub travel_date: NaiveDate,
}

/// Public view of a booking.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    /// Identifier.
    pub id: BookingId,
    /// When the booking was requested.
    pub requested_at: DateTime<Utc>,
    /// Notes.
    pub notes: Option<String>,
    /// Owner.
    pub employee: BookingEmployee,
    /// Booked travel.
    pub travel: BookingTravel,
}

impl From<BookingDetails> for BookingResponse {
    fn from(details: BookingDetails) -> Self {
        Self {
            id: details.booking.id,
            requested_at: details.booking.requested_at,
            notes: details.booking.notes,
            employee: BookingEmployee {
                id: details.booking.employee_id,
                username: details.username,
            },
            travel: BookingTravel {
                id: details.travel.id,
                destination: details.travel.destination,
                travel_date: details.travel.travel_date,
            },
        }
    }
}

// =============================================================================
// Auth and health
// =============================================================================

/// Login response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Access token.
    pub token: String,
    /// Token type, always `Bearer`.
    pub token_type: &'static str,
    /// Seconds until expiry.
    pub expires_in: i64,
}

impl From<IssuedToken> for AuthResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            token_type: "Bearer",
            expires_in: issued.expires_in,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: &'static str,
    /// Version string.
    pub version: &'static str,
}

impl HealthResponse {
    /// Creates a healthy response.
    pub fn healthy() -> Self {
        Self {
            status: "ok",
            version: crate::VERSION,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
