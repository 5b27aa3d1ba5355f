// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Waypoint Integration Tests
//!
//! End-to-end tests that drive the full router (authentication gate,
//! policy, handlers, services, in-memory store) without opening a socket.
//!
//! ## Module Structure
//!
//! - [`common`]: shared helpers
//!   - `fixtures`: configuration and request bodies
//!   - `harness`: [`common::harness::TestApp`], an in-process client
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p waypoint-tests
//! cargo test -p waypoint-tests --test integration_api
//! cargo test -p waypoint-tests --test integration_core
//! ```
//!
//! ## Writing New Tests
//!
//! ```rust,ignore
//! use waypoint_tests::prelude::*;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let app = TestApp::new();
//!     let (admin_id, admin) = app.admin().await;
//!     let response = app.get("/api/employees", Some(&admin)).await;
//!     assert_eq!(response.status, StatusCode::OK);
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod common;

/// Re-export commonly used items for convenience.
pub mod prelude {
    pub use crate::common::fixtures::*;
    pub use crate::common::harness::*;
    pub use crate::common::init_test_logging;
    pub use axum::http::{Method, StatusCode};
    pub use serde_json::{Value, json};
}
