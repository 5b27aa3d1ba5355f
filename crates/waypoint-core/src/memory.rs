// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! In-memory store implementation.
//!
//! [`MemoryStore`] implements every store trait over a single set of tables
//! guarded by one `parking_lot::RwLock`. Each trait method takes the lock
//! once, so checks and writes inside a method form one atomic decision.
//!
//! # Indexes
//!
//! - `usernames`: username -> employee id
//! - `emails`: lowercase email -> employee id
//! - `slots`: `(employee id, travel date)` -> booking id, the unique index
//!   behind the one-booking-per-day rule
//!
//! The lock is never held across an `.await`.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use waypoint_core::MemoryStore;
//!
//! let store = Arc::new(MemoryStore::new());
//! let booking = store.insert_booking(new_booking).await?;
//! ```

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::store::{BookingStore, EmployeeStore, TravelStore};
use crate::types::{
    Booking, BookingId, Employee, EmployeeChange, EmployeeId, NewBooking, NewEmployee, NewTravel,
    Page, PageRequest, Travel, TravelChange, TravelId,
};

// =============================================================================
// Tables
// =============================================================================

#[derive(Debug, Default)]
struct Tables {
    employees: BTreeMap<EmployeeId, Employee>,
    travels: BTreeMap<TravelId, Travel>,
    bookings: BTreeMap<BookingId, Booking>,

    usernames: HashMap<String, EmployeeId>,
    emails: HashMap<String, EmployeeId>,
    slots: HashMap<(EmployeeId, NaiveDate), BookingId>,

    next_employee: i64,
    next_travel: i64,
    next_booking: i64,
}

impl Tables {
    fn has_bookings_for_employee(&self, id: EmployeeId) -> bool {
        self.bookings.values().any(|b| b.employee_id == id)
    }

    fn has_bookings_for_travel(&self, id: TravelId) -> bool {
        self.bookings.values().any(|b| b.travel_id == id)
    }

    /// Moves every booking on `travel` from `from` to `to`, or fails with
    /// `Conflict` before touching anything if an employee would be
    /// double-booked.
    fn move_bookings(
        &mut self,
        travel: TravelId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> CoreResult<()> {
        let moved: Vec<(BookingId, EmployeeId)> = self
            .bookings
            .values()
            .filter(|b| b.travel_id == travel)
            .map(|b| (b.id, b.employee_id))
            .collect();

        if let Some((_, employee)) = moved
            .iter()
            .find(|(_, employee)| self.slots.contains_key(&(*employee, to)))
        {
            return Err(CoreError::conflict(format!(
                "Employee {} already has a booking on {}",
                employee, to
            )));
        }

        for (booking_id, employee) in moved {
            self.slots.remove(&(employee, from));
            self.slots.insert((employee, to), booking_id);
            if let Some(booking) = self.bookings.get_mut(&booking_id) {
                booking.travel_date = to;
            }
        }
        Ok(())
    }

    fn page<T: Clone, K>(map: &BTreeMap<K, T>, request: PageRequest) -> Page<T> {
        Page::slice(map.values().cloned(), map.len() as u64, request)
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// Thread-safe in-memory implementation of all store traits.
///
/// Data is lost when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if every table is empty.
    pub fn is_empty(&self) -> bool {
        let tables = self.tables.read();
        tables.employees.is_empty() && tables.travels.is_empty() && tables.bookings.is_empty()
    }
}

// =============================================================================
// EmployeeStore
// =============================================================================

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn find_employee(&self, id: EmployeeId) -> CoreResult<Option<Employee>> {
        Ok(self.tables.read().employees.get(&id).cloned())
    }

    async fn find_employee_by_email(&self, email: &str) -> CoreResult<Option<Employee>> {
        let tables = self.tables.read();
        Ok(tables
            .emails
            .get(&email.to_lowercase())
            .and_then(|id| tables.employees.get(id))
            .cloned())
    }

    async fn username_exists(&self, username: &str) -> CoreResult<bool> {
        Ok(self.tables.read().usernames.contains_key(username))
    }

    async fn email_exists(&self, email: &str) -> CoreResult<bool> {
        Ok(self.tables.read().emails.contains_key(&email.to_lowercase()))
    }

    async fn insert_employee(&self, employee: NewEmployee) -> CoreResult<Employee> {
        let mut tables = self.tables.write();
        let email_key = employee.email.to_lowercase();

        if tables.usernames.contains_key(&employee.username) {
            return Err(CoreError::conflict("Username already in use"));
        }
        if tables.emails.contains_key(&email_key) {
            return Err(CoreError::conflict("Email already in use"));
        }

        tables.next_employee += 1;
        let id = EmployeeId::new(tables.next_employee);
        let employee = employee.into_employee(id);

        tables.usernames.insert(employee.username.clone(), id);
        tables.emails.insert(email_key, id);
        tables.employees.insert(id, employee.clone());

        debug!(employee_id = %id, "Employee inserted");
        Ok(employee)
    }

    async fn update_employee(
        &self,
        id: EmployeeId,
        change: EmployeeChange,
    ) -> CoreResult<Employee> {
        let mut tables = self.tables.write();
        let Some(current) = tables.employees.get(&id) else {
            return Err(CoreError::not_found("Employee", id));
        };
        let mut employee = current.clone();

        match change {
            EmployeeChange::Profile {
                name,
                surname,
                email,
            } => {
                let old_key = employee.email.to_lowercase();
                let new_key = email.to_lowercase();
                if old_key != new_key {
                    if tables.emails.contains_key(&new_key) {
                        return Err(CoreError::conflict("Email already in use"));
                    }
                    tables.emails.remove(&old_key);
                    tables.emails.insert(new_key, id);
                }
                employee.name = name;
                employee.surname = surname;
                employee.email = email;
            }
            EmployeeChange::Avatar(url) => employee.avatar_url = Some(url),
            EmployeeChange::Role(role) => employee.role = role,
        }

        tables.employees.insert(id, employee.clone());
        debug!(employee_id = %id, "Employee updated");
        Ok(employee)
    }

    async fn delete_employee(&self, id: EmployeeId) -> CoreResult<()> {
        let mut tables = self.tables.write();
        if !tables.employees.contains_key(&id) {
            return Err(CoreError::not_found("Employee", id));
        }
        if tables.has_bookings_for_employee(id) {
            return Err(CoreError::conflict(
                "Cannot delete an employee with existing bookings",
            ));
        }

        if let Some(employee) = tables.employees.remove(&id) {
            tables.usernames.remove(&employee.username);
            tables.emails.remove(&employee.email.to_lowercase());
        }
        debug!(employee_id = %id, "Employee deleted");
        Ok(())
    }

    async fn list_employees(&self, page: PageRequest) -> CoreResult<Page<Employee>> {
        Ok(Tables::page(&self.tables.read().employees, page))
    }

    async fn count_employees(&self) -> CoreResult<u64> {
        Ok(self.tables.read().employees.len() as u64)
    }
}

// =============================================================================
// TravelStore
// =============================================================================

#[async_trait]
impl TravelStore for MemoryStore {
    async fn find_travel(&self, id: TravelId) -> CoreResult<Option<Travel>> {
        Ok(self.tables.read().travels.get(&id).cloned())
    }

    async fn insert_travel(&self, travel: NewTravel) -> CoreResult<Travel> {
        let mut tables = self.tables.write();
        tables.next_travel += 1;
        let travel = Travel {
            id: TravelId::new(tables.next_travel),
            destination: travel.destination,
            travel_date: travel.travel_date,
            status: travel.status,
        };
        tables.travels.insert(travel.id, travel.clone());
        Ok(travel)
    }

    async fn update_travel(&self, id: TravelId, change: TravelChange) -> CoreResult<Travel> {
        let mut tables = self.tables.write();
        let Some(current) = tables.travels.get(&id) else {
            return Err(CoreError::not_found("Travel", id));
        };
        let mut travel = current.clone();

        match change {
            TravelChange::Details {
                destination,
                travel_date,
            } => {
                if travel.travel_date != travel_date {
                    tables.move_bookings(id, travel.travel_date, travel_date)?;
                }
                travel.destination = destination;
                travel.travel_date = travel_date;
            }
            TravelChange::Status(status) => travel.status = status,
        }

        tables.travels.insert(id, travel.clone());
        debug!(travel_id = %id, "Travel updated");
        Ok(travel)
    }

    async fn delete_travel(&self, id: TravelId) -> CoreResult<()> {
        let mut tables = self.tables.write();
        if !tables.travels.contains_key(&id) {
            return Err(CoreError::not_found("Travel", id));
        }
        if tables.has_bookings_for_travel(id) {
            return Err(CoreError::conflict(
                "Cannot delete a travel with existing bookings",
            ));
        }
        tables.travels.remove(&id);
        Ok(())
    }

    async fn list_travels(&self, page: PageRequest) -> CoreResult<Page<Travel>> {
        Ok(Tables::page(&self.tables.read().travels, page))
    }

    async fn count_travels(&self) -> CoreResult<u64> {
        Ok(self.tables.read().travels.len() as u64)
    }
}

// =============================================================================
// BookingStore
// =============================================================================

#[async_trait]
impl BookingStore for MemoryStore {
    async fn find_booking(&self, id: BookingId) -> CoreResult<Option<Booking>> {
        Ok(self.tables.read().bookings.get(&id).cloned())
    }

    async fn booking_exists_for(&self, employee: EmployeeId, date: NaiveDate) -> CoreResult<bool> {
        Ok(self.tables.read().slots.contains_key(&(employee, date)))
    }

    async fn insert_booking(&self, booking: NewBooking) -> CoreResult<Booking> {
        let mut tables = self.tables.write();

        if !tables.employees.contains_key(&booking.employee_id) {
            return Err(CoreError::not_found("Employee", booking.employee_id));
        }
        let Some(travel_date) = tables.travels.get(&booking.travel_id).map(|t| t.travel_date)
        else {
            return Err(CoreError::not_found("Travel", booking.travel_id));
        };

        let slot = (booking.employee_id, travel_date);
        if tables.slots.contains_key(&slot) {
            return Err(CoreError::conflict(format!(
                "Employee {} already has a booking on {}",
                booking.employee_id, travel_date
            )));
        }

        tables.next_booking += 1;
        let booking = Booking {
            id: BookingId::new(tables.next_booking),
            employee_id: booking.employee_id,
            travel_id: booking.travel_id,
            travel_date,
            requested_at: booking.requested_at,
            notes: booking.notes,
        };
        tables.slots.insert(slot, booking.id);
        tables.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn list_bookings(&self, page: PageRequest) -> CoreResult<Page<Booking>> {
        Ok(Tables::page(&self.tables.read().bookings, page))
    }

    async fn list_bookings_of(&self, employee: EmployeeId) -> CoreResult<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .tables
            .read()
            .bookings
            .values()
            .filter(|b| b.employee_id == employee)
            .cloned()
            .collect();
        bookings.sort_by_key(|b| (b.travel_date, b.id));
        Ok(bookings)
    }

    async fn count_bookings(&self) -> CoreResult<u64> {
        Ok(self.tables.read().bookings.len() as u64)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use crate::types::{Role, TravelStatus};

    fn new_employee(username: &str) -> NewEmployee {
        NewEmployee {
            username: username.to_string(),
            name: "Test".into(),
            surname: "User".into(),
            email: format!("{}@example.com", username),
            password_hash: "hash".into(),
            role: Role::User,
        }
    }

    fn new_travel(destination: &str, date: NaiveDate) -> NewTravel {
        NewTravel {
            destination: destination.to_string(),
            travel_date: date,
            status: TravelStatus::Scheduled,
        }
    }

    fn new_booking(employee: EmployeeId, travel: TravelId) -> NewBooking {
        NewBooking {
            employee_id: employee,
            travel_id: travel,
            notes: None,
            requested_at: Utc::now(),
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    #[tokio::test]
    async fn test_employee_uniqueness() {
        let store = MemoryStore::new();
        store.insert_employee(new_employee("mrossi")).await.unwrap();

        let dup_username = store.insert_employee(new_employee("mrossi")).await;
        assert!(matches!(dup_username, Err(CoreError::Conflict(_))));

        let mut dup_email = new_employee("other");
        dup_email.email = "MROSSI@example.com".into();
        assert!(matches!(
            store.insert_employee(dup_email).await,
            Err(CoreError::Conflict(_))
        ));

        assert!(store.email_exists("mrossi@EXAMPLE.com").await.unwrap());
        assert!(
            store
                .find_employee_by_email("MRossi@Example.com")
                .await
                .unwrap()
                .is_some()
        );
    }

    fn profile(email: &str) -> EmployeeChange {
        EmployeeChange::Profile {
            name: "Renamed".into(),
            surname: "User".into(),
            email: email.into(),
        }
    }

    #[tokio::test]
    async fn test_update_employee_email_conflict() {
        let store = MemoryStore::new();
        store.insert_employee(new_employee("a_user")).await.unwrap();
        let b = store.insert_employee(new_employee("b_user")).await.unwrap();

        assert!(matches!(
            store.update_employee(b.id, profile("a_user@example.com")).await,
            Err(CoreError::Conflict(_))
        ));

        store
            .update_employee(b.id, profile("b.new@example.com"))
            .await
            .unwrap();
        assert!(store.email_exists("b.new@example.com").await.unwrap());
        assert!(!store.email_exists("b_user@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_employee_own_email_other_case() {
        let store = MemoryStore::new();
        let mut jose = new_employee("jose");
        jose.email = "josé@example.com".into();
        let jose = store.insert_employee(jose).await.unwrap();

        let updated = store
            .update_employee(jose.id, profile("JOSÉ@example.com"))
            .await
            .unwrap();
        assert_eq!(updated.email, "JOSÉ@example.com");
        assert!(store.email_exists("josé@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_employee_changes_only_its_fields() {
        let store = MemoryStore::new();
        let e = store.insert_employee(new_employee("mrossi")).await.unwrap();

        store
            .update_employee(e.id, EmployeeChange::Role(Role::Admin))
            .await
            .unwrap();
        store
            .update_employee(e.id, EmployeeChange::Avatar("https://cdn.example.com/m.png".into()))
            .await
            .unwrap();
        let updated = store
            .update_employee(e.id, profile("mario@example.com"))
            .await
            .unwrap();

        assert_eq!(updated.role, Role::Admin);
        assert_eq!(updated.avatar_url.as_deref(), Some("https://cdn.example.com/m.png"));
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.username, "mrossi");
        assert_eq!(updated.password_hash, "hash");

        let missing = store
            .update_employee(EmployeeId::new(99), EmployeeChange::Role(Role::User))
            .await;
        assert!(matches!(missing, Err(CoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_booking_unique_per_day() {
        let store = MemoryStore::new();
        let e = store.insert_employee(new_employee("mrossi")).await.unwrap();
        let t1 = store.insert_travel(new_travel("Milano", date(5))).await.unwrap();
        let t2 = store.insert_travel(new_travel("Roma", date(5))).await.unwrap();

        store.insert_booking(new_booking(e.id, t1.id)).await.unwrap();
        assert!(store.booking_exists_for(e.id, date(5)).await.unwrap());

        let second = store.insert_booking(new_booking(e.id, t2.id)).await;
        assert!(matches!(second, Err(CoreError::Conflict(_))));
        assert_eq!(store.count_bookings().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_booking_missing_references() {
        let store = MemoryStore::new();
        let e = store.insert_employee(new_employee("mrossi")).await.unwrap();

        let result = store.insert_booking(new_booking(e.id, TravelId::new(99))).await;
        assert!(matches!(result, Err(CoreError::NotFound { resource: "Travel", .. })));

        let t = store.insert_travel(new_travel("Milano", date(5))).await.unwrap();
        let result = store
            .insert_booking(new_booking(EmployeeId::new(99), t.id))
            .await;
        assert!(matches!(result, Err(CoreError::NotFound { resource: "Employee", .. })));
    }

    #[tokio::test]
    async fn test_delete_guards() {
        let store = MemoryStore::new();
        let e = store.insert_employee(new_employee("mrossi")).await.unwrap();
        let t = store.insert_travel(new_travel("Milano", date(5))).await.unwrap();
        store.insert_booking(new_booking(e.id, t.id)).await.unwrap();

        assert!(matches!(store.delete_employee(e.id).await, Err(CoreError::Conflict(_))));
        assert!(matches!(store.delete_travel(t.id).await, Err(CoreError::Conflict(_))));

        let idle = store.insert_employee(new_employee("idle")).await.unwrap();
        store.delete_employee(idle.id).await.unwrap();
        assert!(store.find_employee(idle.id).await.unwrap().is_none());
        assert!(!store.username_exists("idle").await.unwrap());
    }

    #[tokio::test]
    async fn test_reschedule_moves_slots() {
        let store = MemoryStore::new();
        let e = store.insert_employee(new_employee("mrossi")).await.unwrap();
        let t1 = store.insert_travel(new_travel("Milano", date(5))).await.unwrap();
        let t2 = store.insert_travel(new_travel("Roma", date(6))).await.unwrap();
        store.insert_booking(new_booking(e.id, t1.id)).await.unwrap();
        store.insert_booking(new_booking(e.id, t2.id)).await.unwrap();

        let details = |day| TravelChange::Details {
            destination: "Roma".into(),
            travel_date: date(day),
        };
        assert!(matches!(
            store.update_travel(t2.id, details(5)).await,
            Err(CoreError::Conflict(_))
        ));
        assert!(store.booking_exists_for(e.id, date(6)).await.unwrap());

        store.update_travel(t2.id, details(7)).await.unwrap();
        assert!(!store.booking_exists_for(e.id, date(6)).await.unwrap());
        assert!(store.booking_exists_for(e.id, date(7)).await.unwrap());

        let bookings = store.list_bookings_of(e.id).await.unwrap();
        assert_eq!(bookings[1].travel_date, date(7));
    }

    #[tokio::test]
    async fn test_status_change_keeps_date() {
        let store = MemoryStore::new();
        let t = store.insert_travel(new_travel("Milano", date(5))).await.unwrap();

        store
            .update_travel(
                t.id,
                TravelChange::Details {
                    destination: "Milano".into(),
                    travel_date: date(9),
                },
            )
            .await
            .unwrap();
        let done = store
            .update_travel(t.id, TravelChange::Status(TravelStatus::Completed))
            .await
            .unwrap();

        assert_eq!(done.travel_date, date(9));
        assert_eq!(done.status, TravelStatus::Completed);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_single_winner() {
        let store = Arc::new(MemoryStore::new());
        let e = store.insert_employee(new_employee("mrossi")).await.unwrap();
        let t = store.insert_travel(new_travel("Milano", date(5))).await.unwrap();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.insert_booking(new_booking(e.id, t.id)).await })
            })
            .collect();

        let mut ok = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(CoreError::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(conflicts, 15);
    }

    #[tokio::test]
    async fn test_paging() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store
                .insert_travel(new_travel(&format!("City{}", i), date(1 + i)))
                .await
                .unwrap();
        }
        let page = store.list_travels(PageRequest::new(2, 2)).await.unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].destination, "City2");
    }
}
