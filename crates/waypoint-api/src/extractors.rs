// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Custom extractors for API handlers.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use waypoint_core::PageRequest;

use crate::auth::AuthContext;
use crate::error::ApiError;

// =============================================================================
// Auth Extractor
// =============================================================================

/// Extractor for authenticated requests.
///
/// Extracts the [`AuthContext`] published by the authentication gate.
/// Returns 401 if there is none.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(Auth(ctx): Auth) -> impl IntoResponse {
///     format!("Hello, {}", ctx.username)
/// }
/// ```
pub struct Auth(pub AuthContext);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(Auth)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

// =============================================================================
// Validated JSON Extractor
// =============================================================================

/// JSON body extractor whose rejections render as 400 problems.
///
/// Covers malformed JSON, wrong field types and unparsable dates.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid request body: {}", e.body_text())))?;

        Ok(ValidatedJson(value))
    }
}

// =============================================================================
// Id Path Extractor
// =============================================================================

/// Extractor for a single numeric id path parameter.
pub struct IdPath<T>(pub T);

impl<S, T> FromRequestParts<S> for IdPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid id: {}", e.body_text())))?;

        Ok(IdPath(id))
    }
}

// =============================================================================
// Pagination Extractor
// =============================================================================

/// Query parameters for pagination.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl PaginationParams {
    /// Converts to a clamped page request.
    pub fn to_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.per_page)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

/// Extractor for pagination parameters.
///
/// Out-of-range values are clamped; non-numeric ones are a 400.
pub struct Pagination(pub PageRequest);

impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid pagination parameters: {}", e)))?;

        Ok(Pagination(params.to_request()))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{StatusCode, header};
    use waypoint_core::MAX_PAGE_SIZE;

    async fn pagination(uri: &str) -> Result<PageRequest, ApiError> {
        let req = axum::http::Request::builder().uri(uri).body(()).unwrap();
        let (mut parts, _) = req.into_parts();
        Pagination::from_request_parts(&mut parts, &())
            .await
            .map(|Pagination(page)| page)
    }

    #[tokio::test]
    async fn test_pagination_defaults() {
        let page = pagination("/api/travels").await.unwrap();
        assert_eq!(page, PageRequest::default());
    }

    #[tokio::test]
    async fn test_pagination_camel_case_and_cap() {
        let page = pagination("/api/travels?page=3&perPage=500").await.unwrap();
        assert_eq!(page.page, 3);
        assert_eq!(page.per_page, MAX_PAGE_SIZE);
    }

    #[tokio::test]
    async fn test_pagination_rejects_garbage() {
        let err = pagination("/api/travels?page=abc").await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        day: chrono::NaiveDate,
    }

    #[tokio::test]
    async fn test_json_rejections_are_bad_request() {
        for body in ["{not json", r#"{"day":"2025-13-45"}"#] {
            let req = axum::http::Request::builder()
                .method("POST")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap();
            let result = ValidatedJson::<Payload>::from_request(req, &()).await;
            assert_eq!(
                result.err().map(|e| e.status_code()),
                Some(StatusCode::BAD_REQUEST)
            );
        }
    }
}
