// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # waypoint-core
//!
//! Domain model and business rules for the Waypoint corporate travel
//! booking service.
//!
//! This crate provides:
//!
//! - **Types**: identifiers, `Employee`, `Travel`, `Booking`, `Role`, paging
//! - **Principal**: the authenticated caller attached to a request
//! - **Error**: the `CoreError` failure taxonomy
//! - **Store**: async store traits and the in-memory `MemoryStore`
//! - **Guard**: the one-booking-per-employee-per-day conflict guard
//! - **Service**: employee, travel and booking services
//! - **Seed**: demo data for development
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use waypoint_core::{MemoryStore, PasswordHasher, Principal, Services};
//! use waypoint_core::service::BookingRequest;
//!
//! let store = Arc::new(MemoryStore::new());
//! let services = Services::new(store, PasswordHasher::default());
//!
//! let details = services.bookings.create(&principal, BookingRequest {
//!     employee_id: None,
//!     travel_id: Some(travel_id),
//!     notes: None,
//! }).await?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Core Modules
// =============================================================================

pub mod error;
pub mod principal;
pub mod types;
pub mod validation;

// =============================================================================
// Storage Modules
// =============================================================================

pub mod memory;
pub mod store;

// =============================================================================
// Business Modules
// =============================================================================

pub mod guard;
pub mod password;
pub mod seed;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CoreError, CoreResult};
pub use guard::BookingGuard;
pub use memory::MemoryStore;
pub use password::PasswordHasher;
pub use principal::Principal;
pub use service::Services;
pub use store::{BookingStore, EmployeeStore, TravelStore};
pub use types::{
    Booking, BookingId, Employee, EmployeeChange, EmployeeId, MAX_PAGE_SIZE, Page, PageRequest,
    Role, Travel, TravelChange, TravelId, TravelStatus,
};
pub use validation::{FieldError, ValidationErrors};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
