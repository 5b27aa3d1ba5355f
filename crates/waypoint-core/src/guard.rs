// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Booking conflict guard.
//!
//! Enforces that no employee holds two bookings on the same calendar day.
//! The rule is keyed on the travel's date, not the travel id, so two
//! different travels sharing a date still collide.
//!
//! The guard resolves both references and runs a fast pre-check, then hands
//! the write to [`BookingStore::insert_booking`], which repeats the check and
//! inserts under one lock. The pre-check only produces a clearer log line;
//! the store decision is the one that holds under concurrent requests.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{CoreError, CoreResult};
use crate::store::{BookingStore, EmployeeStore, TravelStore};
use crate::types::{Booking, EmployeeId, NewBooking, TravelId};

/// Gatekeeper for booking writes.
#[derive(Clone)]
pub struct BookingGuard {
    employees: Arc<dyn EmployeeStore>,
    travels: Arc<dyn TravelStore>,
    bookings: Arc<dyn BookingStore>,
}

impl BookingGuard {
    /// Creates a guard over the given stores.
    pub fn new(
        employees: Arc<dyn EmployeeStore>,
        travels: Arc<dyn TravelStore>,
        bookings: Arc<dyn BookingStore>,
    ) -> Self {
        Self {
            employees,
            travels,
            bookings,
        }
    }

    /// Creates a booking or fails with `NotFound` / `Conflict`.
    ///
    /// `employee_id` must already be the effective owner; this method does
    /// no ownership checks.
    pub async fn try_create(
        &self,
        employee_id: EmployeeId,
        travel_id: TravelId,
        notes: Option<String>,
    ) -> CoreResult<Booking> {
        let employee = self
            .employees
            .find_employee(employee_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Employee", employee_id))?;

        let travel = self
            .travels
            .find_travel(travel_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Travel", travel_id))?;

        if self
            .bookings
            .booking_exists_for(employee.id, travel.travel_date)
            .await?
        {
            debug!(
                employee_id = %employee.id,
                travel_id = %travel.id,
                travel_date = %travel.travel_date,
                "Booking rejected by pre-check"
            );
            return Err(CoreError::conflict(format!(
                "Employee {} already has a booking on {}",
                employee.id, travel.travel_date
            )));
        }

        let booking = self
            .bookings
            .insert_booking(NewBooking {
                employee_id: employee.id,
                travel_id: travel.id,
                notes,
                requested_at: Utc::now(),
            })
            .await?;

        info!(
            booking_id = %booking.id,
            employee_id = %booking.employee_id,
            travel_id = %booking.travel_id,
            travel_date = %booking.travel_date,
            "Booking created"
        );
        Ok(booking)
    }
}

impl std::fmt::Debug for BookingGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingGuard").finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
