// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authorization policy middleware.
//!
//! Installed with `Router::layer`, so it runs after routing has matched a
//! route and before the handler. It looks the matched route up in the
//! [`PolicyTable`] and evaluates it against the [`AuthContext`] left by the
//! authentication gate.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    extract::{FromRequestParts, MatchedPath, RawPathParams},
    http::Request,
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};

use waypoint_core::EmployeeId;

use crate::auth::{Access, AuthContext, Owner, PolicyTable, evaluate};

// =============================================================================
// PolicyLayer
// =============================================================================

/// Layer enforcing the per-route [`PolicyTable`].
#[derive(Clone)]
pub struct PolicyLayer {
    table: Arc<PolicyTable>,
}

impl PolicyLayer {
    /// Creates the layer.
    pub fn new(table: impl Into<Arc<PolicyTable>>) -> Self {
        Self {
            table: table.into(),
        }
    }
}

impl<S> Layer<S> for PolicyLayer {
    type Service = PolicyMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        PolicyMiddleware {
            inner,
            table: self.table.clone(),
        }
    }
}

// =============================================================================
// PolicyMiddleware
// =============================================================================

/// Middleware enforcing the per-route policy.
#[derive(Clone)]
pub struct PolicyMiddleware<S> {
    inner: S,
    table: Arc<PolicyTable>,
}

impl<S> Service<Request<Body>> for PolicyMiddleware<S>
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

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let table = self.table.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let Some(route) = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched| matched.as_str().to_owned())
            else {
                return inner.call(req).await;
            };

            let access = table.access_for(req.method(), &route);
            let principal = req
                .extensions()
                .get::<AuthContext>()
                .map(|ctx| ctx.principal);

            let (mut parts, body) = req.into_parts();
            let owner = match access {
                Access::AdminOrOwner(Owner::Path(name)) => {
                    RawPathParams::from_request_parts(&mut parts, &())
                        .await
                        .ok()
                        .and_then(|params| {
                            params
                                .iter()
                                .find(|(key, _)| *key == name)
                                .and_then(|(_, value)| value.parse::<EmployeeId>().ok())
                        })
                }
                _ => None,
            };
            let req = Request::from_parts(parts, body);

            // Resource-owned routes decide in the handler once the owner is known.
            let access = match access {
                Access::AdminOrOwner(Owner::Resource) => Access::Authenticated,
                other => other,
            };

            if let Err(e) = evaluate(access, principal.as_ref(), owner) {
                tracing::debug!(
                    method = %req.method(),
                    route = %route,
                    principal = ?principal,
                    "Request denied by policy"
                );
                return Ok(e.into_response());
            }

            inner.call(req).await
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{Router, http::StatusCode, routing::get};
    use tower::ServiceExt;
    use waypoint_core::{Principal, Role};

    use crate::routes;

    fn context(id: i64, role: Role) -> AuthContext {
        AuthContext {
            principal: Principal::new(EmployeeId::new(id), role),
            username: format!("user{}", id),
            request_id: uuid::Uuid::now_v7(),
            client_ip: None,
        }
    }

    fn router() -> Router {
        Router::new()
            .route(routes::EMPLOYEE_BOOKINGS, get(|| async { "bookings" }))
            .route(routes::BOOKINGS, get(|| async { "all" }).post(|| async { "created" }))
            .route(routes::HEALTH, get(|| async { "ok" }))
            .layer(PolicyLayer::new(PolicyTable::standard()))
    }

    async fn call(method: &str, path: &str, ctx: Option<AuthContext>) -> StatusCode {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap();
        if let Some(ctx) = ctx {
            req.extensions_mut().insert(ctx);
        }
        router().oneshot(req).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_open_route() {
        assert_eq!(call("GET", "/health", None).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_principal() {
        assert_eq!(
            call("POST", "/api/bookings", None).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_admin_only() {
        assert_eq!(
            call("GET", "/api/bookings", Some(context(2, Role::User))).await,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            call("GET", "/api/bookings", Some(context(1, Role::Admin))).await,
            StatusCode::OK
        );
        assert_eq!(
            call("POST", "/api/bookings", Some(context(2, Role::User))).await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_owner_from_path() {
        assert_eq!(
            call("GET", "/api/employees/2/bookings", Some(context(2, Role::User))).await,
            StatusCode::OK
        );
        assert_eq!(
            call("GET", "/api/employees/7/bookings", Some(context(2, Role::User))).await,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            call("GET", "/api/employees/7/bookings", Some(context(1, Role::Admin))).await,
            StatusCode::OK
        );
        assert_eq!(
            call("GET", "/api/employees/abc/bookings", Some(context(2, Role::User))).await,
            StatusCode::FORBIDDEN
        );
    }
}
