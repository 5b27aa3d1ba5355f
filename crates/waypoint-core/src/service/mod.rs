// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Domain services.
//!
//! - [`EmployeeService`]: accounts, credentials, profile, role
//! - [`TravelService`]: travel catalogue
//! - [`BookingService`]: booking workflow behind the conflict guard

mod booking;
mod employee;
mod travel;

use std::sync::Arc;

pub use booking::{BookingDetails, BookingRequest, BookingService, MAX_NOTES_LEN, effective_employee_id};
pub use employee::{EmployeeService, RegisterEmployee, UpdateEmployee};
pub use travel::{TravelInput, TravelService};

use crate::password::PasswordHasher;
use crate::store::{BookingStore, EmployeeStore, TravelStore};

/// All services wired to one backing store.
#[derive(Debug, Clone)]
pub struct Services {
    /// Employee accounts.
    pub employees: EmployeeService,
    /// Travel catalogue.
    pub travels: TravelService,
    /// Bookings.
    pub bookings: BookingService,
}

impl Services {
    /// Wires every service to `store`.
    pub fn new<S>(store: Arc<S>, hasher: PasswordHasher) -> Self
    where
        S: EmployeeStore + TravelStore + BookingStore + 'static,
    {
        Self {
            employees: EmployeeService::new(store.clone(), hasher),
            travels: TravelService::new(store.clone()),
            bookings: BookingService::new(store.clone(), store.clone(), store),
        }
    }
}
