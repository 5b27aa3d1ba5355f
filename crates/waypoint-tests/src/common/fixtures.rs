// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures
//!
//! Configuration and request bodies shared across suites.

use chrono::{Days, NaiveDate};
use serde_json::{Value, json};

use waypoint_config::{SecretValue, WaypointConfig};

/// Signing secret used by every test application.
pub const TEST_SECRET: &str = "integration-test-secret-long-enough-for-hs256";

/// Password that satisfies the password policy.
pub const TEST_PASSWORD: &str = "Password1";

/// Configuration with a secret set and the cheapest bcrypt cost.
pub fn test_config() -> WaypointConfig {
    let mut config = WaypointConfig::default();
    config.security.jwt.secret = Some(SecretValue::new(TEST_SECRET));
    config.security.bcrypt_cost = 4;
    config
}

/// Registration body for `username`, with an email derived from it.
pub fn register_body(username: &str) -> Value {
    json!({
        "username": username,
        "name": "Test",
        "surname": "Employee",
        "email": email_for(username),
        "password": TEST_PASSWORD,
    })
}

/// Email used for a fixture employee.
pub fn email_for(username: &str) -> String {
    format!("{}@example.com", username)
}

/// A fixed base date for travels, so conflicts are deterministic.
pub fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2027, 3, 1).unwrap_or_default()
}

/// `base_date()` shifted by `days`.
pub fn date_after(days: u64) -> NaiveDate {
    base_date()
        .checked_add_days(Days::new(days))
        .unwrap_or_else(base_date)
}

/// Travel body for `destination` on `date`.
pub fn travel_body(destination: &str, date: NaiveDate) -> Value {
    json!({
        "destination": destination,
        "travelDate": date.to_string(),
    })
}
