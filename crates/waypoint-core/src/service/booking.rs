// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Booking workflow.
//!
//! Creation resolves the effective owner from the caller before the
//! [`BookingGuard`] sees the request: a non-admin always books for itself,
//! whatever `employeeId` the payload carries.

use std::sync::Arc;

use serde::Deserialize;
use tracing::warn;

use crate::error::{CoreError, CoreResult};
use crate::guard::BookingGuard;
use crate::principal::Principal;
use crate::store::{BookingStore, EmployeeStore, TravelStore};
use crate::types::{Booking, BookingId, EmployeeId, Page, PageRequest, Travel, TravelId};
use crate::validation::ValidationErrors;

/// Longest accepted note.
pub const MAX_NOTES_LEN: usize = 500;

// =============================================================================
// Inputs and views
// =============================================================================

/// A booking request as sent by a client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Requested owner. Honored for admins only.
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
    /// Travel to book.
    #[serde(default)]
    pub travel_id: Option<TravelId>,
    /// Free-form notes, at most 500 characters.
    #[serde(default)]
    pub notes: Option<String>,
}

/// A booking with its employee and travel resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDetails {
    /// The booking record.
    pub booking: Booking,
    /// Username of the owner.
    pub username: String,
    /// The booked travel.
    pub travel: Travel,
}

/// Picks the employee a booking is created for.
///
/// Admins book on behalf of the named employee and must name one. Everybody
/// else books for themselves; a differing `employeeId` is ignored.
pub fn effective_employee_id(
    principal: &Principal,
    requested: Option<EmployeeId>,
) -> CoreResult<EmployeeId> {
    if principal.is_admin() {
        return requested
            .ok_or_else(|| CoreError::invalid_field("employeeId", "employeeId is required"));
    }

    if let Some(requested) = requested.filter(|id| !principal.is(*id)) {
        warn!(
            principal_id = %principal.id,
            requested_id = %requested,
            "Ignoring employeeId supplied by non-admin caller"
        );
    }
    Ok(principal.id)
}

// =============================================================================
// BookingService
// =============================================================================

/// Booking management.
#[derive(Clone)]
pub struct BookingService {
    employees: Arc<dyn EmployeeStore>,
    travels: Arc<dyn TravelStore>,
    bookings: Arc<dyn BookingStore>,
    guard: BookingGuard,
}

impl BookingService {
    /// Creates the service over the three stores.
    pub fn new(
        employees: Arc<dyn EmployeeStore>,
        travels: Arc<dyn TravelStore>,
        bookings: Arc<dyn BookingStore>,
    ) -> Self {
        let guard = BookingGuard::new(employees.clone(), travels.clone(), bookings.clone());
        Self {
            employees,
            travels,
            bookings,
            guard,
        }
    }

    /// Creates a booking on behalf of `principal`.
    pub async fn create(
        &self,
        principal: &Principal,
        request: BookingRequest,
    ) -> CoreResult<BookingDetails> {
        let mut errors = ValidationErrors::new();
        if request.travel_id.is_none() {
            errors.add("travelId", "travelId is required");
        }
        errors.max_length("notes", request.notes.as_deref(), MAX_NOTES_LEN);
        errors.into_result()?;

        let employee_id = effective_employee_id(principal, request.employee_id)?;
        let travel_id = request
            .travel_id
            .ok_or_else(|| CoreError::invalid_field("travelId", "travelId is required"))?;
        let notes = request
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let booking = self.guard.try_create(employee_id, travel_id, notes).await?;
        self.details(booking).await
    }

    /// Returns a booking or `NotFound`.
    pub async fn get(&self, id: BookingId) -> CoreResult<Booking> {
        self.bookings
            .find_booking(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Booking", id))
    }

    /// Lists all bookings.
    pub async fn list(&self, page: PageRequest) -> CoreResult<Page<BookingDetails>> {
        let page = self.bookings.list_bookings(page).await?;
        let mut items = Vec::with_capacity(page.items.len());
        for booking in page.items {
            items.push(self.details(booking).await?);
        }
        Ok(Page {
            items,
            total: page.total,
            request: page.request,
        })
    }

    /// Lists the bookings of one employee. Fails with `NotFound` for an
    /// unknown employee.
    pub async fn list_for_employee(&self, id: EmployeeId) -> CoreResult<Vec<BookingDetails>> {
        if self.employees.find_employee(id).await?.is_none() {
            return Err(CoreError::not_found("Employee", id));
        }
        let bookings = self.bookings.list_bookings_of(id).await?;
        let mut items = Vec::with_capacity(bookings.len());
        for booking in bookings {
            items.push(self.details(booking).await?);
        }
        Ok(items)
    }

    /// Resolves the employee and travel of a booking by id.
    pub async fn details(&self, booking: Booking) -> CoreResult<BookingDetails> {
        let employee = self
            .employees
            .find_employee(booking.employee_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Employee", booking.employee_id))?;
        let travel = self
            .travels
            .find_travel(booking.travel_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Travel", booking.travel_id))?;

        Ok(BookingDetails {
            booking,
            username: employee.username,
            travel,
        })
    }
}

impl std::fmt::Debug for BookingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingService")
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
