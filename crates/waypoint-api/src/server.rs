// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API server implementation.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    Router,
    http::{HeaderValue, Method, StatusCode, header},
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

use waypoint_config::ServerConfig;

use crate::error::{ApiError, ApiResult};
use crate::handlers::{auth, bookings, employees, health, travels};
use crate::middleware::{AuthLayer, PolicyLayer};
use crate::routes;
use crate::state::AppState;

// =============================================================================
// Router
// =============================================================================

/// Builds the router with all routes and middleware.
///
/// Request order: trace, timeout, CORS, authentication gate, routing,
/// authorization policy, handler.
pub fn router(state: AppState) -> Router {
    let server = &state.config.server;

    let auth = AuthLayer::new(state.codec.clone(), state.employees.clone())
        .with_public_paths(state.config.security.public_paths.iter().cloned());

    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            server.request_timeout(),
        ))
        .layer(create_cors_layer(server))
        .layer(auth);

    Router::new()
        .route(routes::HEALTH, get(health::health))
        // Auth
        .route(routes::LOGIN, post(auth::login))
        .route(routes::REGISTER, post(auth::register))
        // Employees
        .route(
            routes::EMPLOYEES,
            get(employees::list).post(employees::create),
        )
        .route(
            routes::EMPLOYEE_ME,
            get(employees::me).put(employees::update_me),
        )
        .route(routes::EMPLOYEE_ME_AVATAR, put(employees::update_my_avatar))
        .route(
            routes::EMPLOYEE,
            get(employees::get)
                .put(employees::update)
                .delete(employees::delete),
        )
        .route(routes::EMPLOYEE_AVATAR, put(employees::update_avatar))
        .route(routes::EMPLOYEE_ROLE, put(employees::update_role))
        .route(routes::EMPLOYEE_BOOKINGS, get(employees::bookings))
        // Travels
        .route(routes::TRAVELS, get(travels::list).post(travels::create))
        .route(
            routes::TRAVEL,
            get(travels::get)
                .put(travels::update)
                .delete(travels::delete),
        )
        .route(
            routes::TRAVEL_STATUS,
            axum::routing::patch(travels::set_status),
        )
        // Bookings
        .route(routes::BOOKINGS, get(bookings::list).post(bookings::create))
        .route(routes::BOOKINGS_ME, get(bookings::mine))
        .route(routes::BOOKING, get(bookings::get))
        // Policy runs after routing so it can see the matched route.
        .layer(PolicyLayer::new(state.policy.clone()))
        .layer(middleware_stack)
        .with_state(state)
}

// =============================================================================
// ApiServer
// =============================================================================

/// The API server.
pub struct ApiServer {
    state: AppState,
}

impl ApiServer {
    /// Creates a server over the given state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Returns the configured bind address.
    pub fn addr(&self) -> SocketAddr {
        self.state.config.server.socket_addr()
    }

    /// Creates the router.
    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Binds the configured address and serves until `shutdown_signal`
    /// resolves.
    pub async fn run_with_shutdown(
        self,
        shutdown_signal: impl Future<Output = ()> + Send + 'static,
    ) -> ApiResult<()> {
        let addr = self.addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to bind {}: {}", addr, e)))?;

        self.serve(listener, shutdown_signal).await
    }

    /// Serves on an already bound listener until `shutdown_signal` resolves.
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown_signal: impl Future<Output = ()> + Send + 'static,
    ) -> ApiResult<()> {
        let router = self.router();
        let local = listener
            .local_addr()
            .map_err(|e| ApiError::internal(format!("Listener address unavailable: {}", e)))?;

        info!(addr = %local, "Starting API server");

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| ApiError::internal(format!("Server error: {}", e)))?;

        info!("API server shutdown complete");
        Ok(())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Creates the CORS layer from configuration.
fn create_cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .max_age(Duration::from_secs(3600))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    if config.cors_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}

// =============================================================================
// Tests
// =============================================================================
