// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication gate.
//!
//! Runs before routing reaches any handler:
//!
//! 1. public path prefix: forward untouched
//! 2. extract the bearer token, else `MISSING_TOKEN`
//! 3. verify it, else `INVALID_TOKEN`
//! 4. resolve the subject in the credential store, else `INVALID_TOKEN`
//! 5. attach an [`AuthContext`] and forward
//!
//! Rejections are rendered here as a 401 [`Problem`]; generic error handling
//! never sees them.

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, StatusCode, header},
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};
use uuid::Uuid;

use waypoint_core::EmployeeStore;

use crate::auth::{AuthContext, AuthError, TokenCodec};
use crate::error::{ApiError, Problem};

// =============================================================================
// AuthLayer
// =============================================================================

/// Layer installing the authentication gate.
#[derive(Clone)]
pub struct AuthLayer {
    codec: TokenCodec,
    employees: Arc<dyn EmployeeStore>,
    public_paths: Arc<[String]>,
}

impl AuthLayer {
    /// Creates a gate with no public paths.
    pub fn new(codec: TokenCodec, employees: Arc<dyn EmployeeStore>) -> Self {
        Self {
            codec,
            employees,
            public_paths: Arc::from(Vec::new()),
        }
    }

    /// Sets the path prefixes exempt from authentication.
    pub fn with_public_paths(mut self, paths: impl IntoIterator<Item = String>) -> Self {
        self.public_paths = paths.into_iter().collect();
        self
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            codec: self.codec.clone(),
            employees: self.employees.clone(),
            public_paths: self.public_paths.clone(),
        }
    }
}

// =============================================================================
// AuthMiddleware
// =============================================================================

/// Middleware enforcing authentication.
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    codec: TokenCodec,
    employees: Arc<dyn EmployeeStore>,
    public_paths: Arc<[String]>,
}

impl<S> AuthMiddleware<S> {
    /// Checks if a path starts with a public prefix.
    fn is_public_path(&self, path: &str) -> bool {
        self.public_paths
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let is_public = self.is_public_path(req.uri().path());
        let codec = self.codec.clone();
        let employees = self.employees.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            if is_public {
                return inner.call(req).await;
            }

            let path = req.uri().path().to_string();

            let Some(token) = extract_bearer_token(&req) else {
                tracing::debug!(path = %path, "No bearer token provided");
                return Ok(reject(AuthError::MissingToken, path));
            };

            let verified = match codec.verify(token) {
                Ok(verified) => verified,
                Err(e) => {
                    tracing::debug!(path = %path, reason = e.reason(), "Token rejected");
                    return Ok(reject(e, path));
                }
            };

            let employee = match employees.find_employee(verified.subject).await {
                Ok(Some(employee)) => employee,
                Ok(None) => {
                    tracing::debug!(
                        path = %path,
                        subject = %verified.subject,
                        "Token subject no longer exists"
                    );
                    return Ok(reject(AuthError::InvalidToken("unknown subject"), path));
                }
                Err(e) => return Ok(ApiError::from(e).into_response()),
            };

            let client_ip = req
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ci| ci.0.ip());

            let context = AuthContext::for_employee(&employee)
                .with_request_id(Uuid::now_v7())
                .with_client_ip(client_ip);

            tracing::trace!(
                employee_id = %context.employee_id(),
                role = context.role().as_str(),
                request_id = %context.request_id,
                "Request authenticated"
            );

            req.extensions_mut().insert(context);
            inner.call(req).await
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Extracts the bearer token from the Authorization header.
///
/// The scheme must be exactly `Bearer` followed by one space and a non-empty
/// token.
pub(crate) fn extract_bearer_token<B>(req: &Request<B>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn reject(error: AuthError, path: String) -> Response {
    Problem::new(StatusCode::UNAUTHORIZED, error.to_string())
        .with_code(error.code())
        .with_path(path)
        .into_response()
}

// =============================================================================
// Tests
// =============================================================================
