// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Core domain types for Waypoint.
//!
//! This module defines the records the booking service works with:
//!
//! - Identifiers: [`EmployeeId`], [`TravelId`], [`BookingId`]
//! - Enumerations: [`Role`], [`TravelStatus`]
//! - Records: [`Employee`], [`Travel`], [`Booking`] and their insert forms
//! - Paging: [`PageRequest`], [`Page`]

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Identifiers
// =============================================================================

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw identifier.
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw identifier.
            #[inline]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i64>().map(Self)
            }
        }
    };
}

numeric_id! {
    /// Identifier of an employee record.
    ///
    /// ```
    /// use waypoint_core::types::EmployeeId;
    ///
    /// let id: EmployeeId = "42".parse().unwrap();
    /// assert_eq!(id.get(), 42);
    /// ```
    EmployeeId
}

numeric_id! {
    /// Identifier of a travel record.
    TravelId
}

numeric_id! {
    /// Identifier of a booking record.
    BookingId
}

// =============================================================================
// Role
// =============================================================================

/// Authorization role of an employee.
///
/// Serialized as `ADMIN` / `USER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full access to every resource.
    Admin,
    /// Regular employee, limited to its own resources.
    #[default]
    User,
}

impl Role {
    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }

    /// Parses a role name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "USER" => Some(Role::User),
            _ => None,
        }
    }

    /// Returns `true` for [`Role::Admin`].
    #[inline]
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// TravelStatus
// =============================================================================

/// Lifecycle status of a travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelStatus {
    /// Planned and open for bookings.
    #[default]
    Scheduled,
    /// Already took place.
    Completed,
}

impl TravelStatus {
    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelStatus::Scheduled => "SCHEDULED",
            TravelStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for TravelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Employee
// =============================================================================

/// A stored employee.
///
/// `Debug` is implemented by hand so the password hash never reaches logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Employee {
    /// Unique identifier.
    pub id: EmployeeId,
    /// Unique login handle.
    pub username: String,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Unique email address, compared case-insensitively.
    pub email: String,
    /// bcrypt hash of the password.
    pub password_hash: String,
    /// Current role. Re-read on every request.
    pub role: Role,
    /// Optional avatar URL.
    pub avatar_url: Option<String>,
}

impl fmt::Debug for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Employee")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("password_hash", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Insert form of an [`Employee`]; the store assigns the id.
#[derive(Clone)]
pub struct NewEmployee {
    /// Unique login handle.
    pub username: String,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Unique email address.
    pub email: String,
    /// bcrypt hash of the password.
    pub password_hash: String,
    /// Initial role.
    pub role: Role,
}

impl NewEmployee {
    pub(crate) fn into_employee(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            username: self.username,
            name: self.name,
            surname: self.surname,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role,
            avatar_url: None,
        }
    }
}

/// A field-level change to a stored [`Employee`].
///
/// The store applies it to the current record under its write lock, so
/// concurrent changes to different fields never overwrite each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeChange {
    /// Name, surname and email.
    Profile {
        /// Given name.
        name: String,
        /// Family name.
        surname: String,
        /// Email address.
        email: String,
    },
    /// Avatar URL.
    Avatar(String),
    /// Role.
    Role(Role),
}

// =============================================================================
// Travel
// =============================================================================

/// A stored travel slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Travel {
    /// Unique identifier.
    pub id: TravelId,
    /// Destination city.
    pub destination: String,
    /// Calendar day of the travel.
    pub travel_date: NaiveDate,
    /// Lifecycle status.
    pub status: TravelStatus,
}

/// Insert form of a [`Travel`].
#[derive(Debug, Clone)]
pub struct NewTravel {
    /// Destination city.
    pub destination: String,
    /// Calendar day of the travel.
    pub travel_date: NaiveDate,
    /// Initial status.
    pub status: TravelStatus,
}

/// A field-level change to a stored [`Travel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TravelChange {
    /// Destination and date. Bookings on the travel follow the new date.
    Details {
        /// Destination city.
        destination: String,
        /// Calendar day of the travel.
        travel_date: NaiveDate,
    },
    /// Lifecycle status.
    Status(TravelStatus),
}

// =============================================================================
// Booking
// =============================================================================

/// A stored booking.
///
/// `travel_date` is copied from the travel at insert time and kept in sync
/// when the travel is rescheduled; it backs the one-booking-per-day index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// Unique identifier.
    pub id: BookingId,
    /// Owner of the booking.
    pub employee_id: EmployeeId,
    /// Booked travel.
    pub travel_id: TravelId,
    /// Date of the booked travel.
    pub travel_date: NaiveDate,
    /// When the booking was requested.
    pub requested_at: DateTime<Utc>,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Insert form of a [`Booking`].
///
/// The travel date is resolved by the store inside the same critical
/// section that checks uniqueness.
#[derive(Debug, Clone)]
pub struct NewBooking {
    /// Owner of the booking.
    pub employee_id: EmployeeId,
    /// Travel to book.
    pub travel_id: TravelId,
    /// Free-form notes.
    pub notes: Option<String>,
    /// When the booking was requested.
    pub requested_at: DateTime<Utc>,
}

// =============================================================================
// Paging
// =============================================================================

/// Largest page size a caller may ask for.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number, starting at 1.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
}

impl PageRequest {
    /// Creates a page request, clamping both values into range.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of items to skip.
    #[inline]
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.per_page as usize
    }

    /// Number of items to take.
    #[inline]
    pub fn limit(&self) -> usize {
        self.per_page as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 20)
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total: u64,
    /// The request that produced this page.
    pub request: PageRequest,
}

impl<T> Page<T> {
    /// Slices a full, ordered iterator into the requested page.
    pub fn slice<I>(iter: I, total: u64, request: PageRequest) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let items = iter
            .into_iter()
            .skip(request.offset())
            .take(request.limit())
            .collect();
        Self {
            items,
            total,
            request,
        }
    }

    /// Maps every item, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            request: self.request,
        }
    }

    /// Total number of pages.
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.request.per_page as u64)
    }
}

// =============================================================================
// Tests
// =============================================================================
