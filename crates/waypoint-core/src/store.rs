// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Store traits.
//!
//! Services talk to persistence only through these traits. Implementations
//! must be safe to call concurrently and must enforce the uniqueness rules
//! themselves; application-level pre-checks are advisory.
//!
//! Rules every implementation enforces atomically:
//!
//! - usernames and emails (case-insensitive) are unique among employees
//! - at most one booking exists per `(employee, travel date)` pair
//! - employees and travels with bookings cannot be deleted
//! - rescheduling a travel cannot give an employee two bookings on one day

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::CoreResult;
use crate::types::{
    Booking, BookingId, Employee, EmployeeChange, EmployeeId, NewBooking, NewEmployee, NewTravel,
    Page, PageRequest, Travel, TravelChange, TravelId,
};

// =============================================================================
// EmployeeStore
// =============================================================================

/// Credential store.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Looks an employee up by id.
    async fn find_employee(&self, id: EmployeeId) -> CoreResult<Option<Employee>>;

    /// Looks an employee up by email, case-insensitively.
    async fn find_employee_by_email(&self, email: &str) -> CoreResult<Option<Employee>>;

    /// Returns `true` if the username is taken.
    async fn username_exists(&self, username: &str) -> CoreResult<bool>;

    /// Returns `true` if the email is taken, case-insensitively.
    async fn email_exists(&self, email: &str) -> CoreResult<bool>;

    /// Inserts an employee. Fails with `Conflict` on a duplicate username or email.
    async fn insert_employee(&self, employee: NewEmployee) -> CoreResult<Employee>;

    /// Applies `change` to the current record and returns the result.
    ///
    /// Fields outside the change are left as stored. Fails with `NotFound`
    /// if missing and `Conflict` if a new email belongs to somebody else.
    async fn update_employee(
        &self,
        id: EmployeeId,
        change: EmployeeChange,
    ) -> CoreResult<Employee>;

    /// Deletes an employee. Fails with `Conflict` if it still has bookings.
    async fn delete_employee(&self, id: EmployeeId) -> CoreResult<()>;

    /// Lists employees ordered by id.
    async fn list_employees(&self, page: PageRequest) -> CoreResult<Page<Employee>>;

    /// Number of stored employees.
    async fn count_employees(&self) -> CoreResult<u64>;
}

// =============================================================================
// TravelStore
// =============================================================================

/// Travel store.
#[async_trait]
pub trait TravelStore: Send + Sync {
    /// Looks a travel up by id.
    async fn find_travel(&self, id: TravelId) -> CoreResult<Option<Travel>>;

    /// Inserts a travel.
    async fn insert_travel(&self, travel: NewTravel) -> CoreResult<Travel>;

    /// Applies `change` to the current record and returns the result.
    ///
    /// When the date changes, every booking on the travel moves with it. Fails
    /// with `Conflict` if that would double-book an employee.
    async fn update_travel(&self, id: TravelId, change: TravelChange) -> CoreResult<Travel>;

    /// Deletes a travel. Fails with `Conflict` if it still has bookings.
    async fn delete_travel(&self, id: TravelId) -> CoreResult<()>;

    /// Lists travels ordered by id.
    async fn list_travels(&self, page: PageRequest) -> CoreResult<Page<Travel>>;

    /// Number of stored travels.
    async fn count_travels(&self) -> CoreResult<u64>;
}

// =============================================================================
// BookingStore
// =============================================================================

/// Booking store.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Looks a booking up by id.
    async fn find_booking(&self, id: BookingId) -> CoreResult<Option<Booking>>;

    /// Returns `true` if the employee already holds a booking on `date`.
    async fn booking_exists_for(&self, employee: EmployeeId, date: NaiveDate) -> CoreResult<bool>;

    /// Inserts a booking as one atomic decision.
    ///
    /// Resolves the travel date, checks that employee and travel exist and
    /// that no booking pairs the employee with that date, then inserts. Fails
    /// with `NotFound` or `Conflict` without writing anything.
    async fn insert_booking(&self, booking: NewBooking) -> CoreResult<Booking>;

    /// Lists bookings ordered by id.
    async fn list_bookings(&self, page: PageRequest) -> CoreResult<Page<Booking>>;

    /// Lists an employee's bookings ordered by travel date.
    async fn list_bookings_of(&self, employee: EmployeeId) -> CoreResult<Vec<Booking>>;

    /// Number of stored bookings.
    async fn count_bookings(&self) -> CoreResult<u64>;
}
