// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Demo data.
//!
//! Seeds three employees, three travels and three bookings, going through
//! the services so every record passes the same validation and guard as
//! API traffic. Does nothing unless the store is completely empty.

use chrono::{Days, NaiveDate, Utc};
use tracing::info;

use crate::error::{CoreError, CoreResult};
use crate::principal::Principal;
use crate::service::{BookingRequest, RegisterEmployee, Services, TravelInput};
use crate::types::{Role, TravelStatus};

/// Password shared by all seeded accounts.
pub const SEED_PASSWORD: &str = "Password1";

/// What a seeding run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Records were inserted.
    Seeded {
        /// Employees inserted.
        employees: usize,
        /// Travels inserted.
        travels: usize,
        /// Bookings inserted.
        bookings: usize,
    },
    /// The store already held data.
    Skipped,
}

/// Seeds the demo data set if the store is empty.
pub async fn seed_demo_data(services: &Services) -> CoreResult<SeedOutcome> {
    let empty = services.employees.list(Default::default()).await?.total == 0
        && services.travels.list(Default::default()).await?.total == 0
        && services.bookings.list(Default::default()).await?.total == 0;
    if !empty {
        info!("Store not empty, skipping seed");
        return Ok(SeedOutcome::Skipped);
    }

    let people = [
        ("mrossi", "Mario", "Rossi", "m.rossi@example.com", Role::Admin),
        ("lbianchi", "Luca", "Bianchi", "l.bianchi@example.com", Role::User),
        ("gverdi", "Giulia", "Verdi", "g.verdi@example.com", Role::User),
    ];
    let mut employees = Vec::with_capacity(people.len());
    for (username, name, surname, email, role) in people {
        let form = RegisterEmployee {
            username: username.into(),
            name: name.into(),
            surname: surname.into(),
            email: email.into(),
            password: SEED_PASSWORD.into(),
        };
        employees.push(services.employees.register(form, role).await?);
    }

    let today = Utc::now().date_naive();
    let trips = [
        ("Milano", 5, TravelStatus::Scheduled),
        ("Roma", 10, TravelStatus::Completed),
        ("Torino", 15, TravelStatus::Scheduled),
    ];
    let mut travels = Vec::with_capacity(trips.len());
    for (destination, offset, status) in trips {
        let input = TravelInput {
            destination: destination.into(),
            travel_date: Some(days_after(today, offset)?),
            status: Some(status),
        };
        travels.push(services.travels.create(input).await?);
    }

    let admin = Principal::from(&employees[0]);
    let plan = [
        (0, 0, Some("Window seat if possible")),
        (1, 0, None),
        (0, 2, None),
    ];
    for (employee, travel, notes) in plan {
        let request = BookingRequest {
            employee_id: Some(employees[employee].id),
            travel_id: Some(travels[travel].id),
            notes: notes.map(str::to_string),
        };
        services.bookings.create(&admin, request).await?;
    }

    info!(
        employees = employees.len(),
        travels = travels.len(),
        bookings = plan.len(),
        "Demo data seeded"
    );
    Ok(SeedOutcome::Seeded {
        employees: employees.len(),
        travels: travels.len(),
        bookings: plan.len(),
    })
}

fn days_after(date: NaiveDate, days: u64) -> CoreResult<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| CoreError::Storage("seed date out of range".into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::memory::MemoryStore;
    use crate::password::PasswordHasher;

    #[tokio::test]
    async fn test_seed_once() {
        let store = Arc::new(MemoryStore::new());
        let services = Services::new(store.clone(), PasswordHasher::new(4));

        let first = seed_demo_data(&services).await.unwrap();
        assert_eq!(
            first,
            SeedOutcome::Seeded {
                employees: 3,
                travels: 3,
                bookings: 3
            }
        );

        let second = seed_demo_data(&services).await.unwrap();
        assert_eq!(second, SeedOutcome::Skipped);

        let admin = services
            .employees
            .authenticate("m.rossi@example.com", SEED_PASSWORD)
            .await
            .unwrap();
        assert!(admin.role.is_admin());
        assert_eq!(
            services.bookings.list_for_employee(admin.id).await.unwrap().len(),
            2
        );
    }
}
