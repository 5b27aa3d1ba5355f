// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Token codec.
//!
//! Issues and verifies HS256-signed JWTs. The codec is built once at startup
//! from immutable settings and shared behind `Arc`s; verification is pure
//! computation and performs no I/O.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use waypoint_config::JwtConfig;
use waypoint_core::EmployeeId;

use super::claims::{Claims, DisplayClaims};
use super::error::AuthError;
use crate::error::{ApiError, ApiResult};

const ALGORITHM: Algorithm = Algorithm::HS256;

// =============================================================================
// Token types
// =============================================================================

/// A freshly issued token.
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// The encoded token.
    pub token: String,
    /// Seconds until expiry.
    pub expires_in: i64,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("expires_in", &self.expires_in)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Result of a successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    /// The employee id carried as subject.
    pub subject: EmployeeId,
    /// All decoded claims.
    pub claims: Claims,
}

// =============================================================================
// TokenCodec
// =============================================================================

/// Issues and verifies signed tokens.
#[derive(Clone)]
pub struct TokenCodec {
    issuer: Arc<str>,
    lifetime: Duration,
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    validation: Arc<Validation>,
}

impl TokenCodec {
    /// Creates a codec.
    ///
    /// `leeway_secs` is the clock skew tolerated on expiry.
    pub fn new(
        secret: &str,
        issuer: impl Into<String>,
        lifetime: std::time::Duration,
        leeway_secs: u64,
    ) -> ApiResult<Self> {
        if secret.trim().is_empty() {
            return Err(ApiError::internal("Token secret is not configured"));
        }
        let lifetime = Duration::from_std(lifetime)
            .map_err(|_| ApiError::internal("Token lifetime out of range"))?;
        if lifetime <= Duration::zero() {
            return Err(ApiError::internal("Token lifetime must be positive"));
        }

        let issuer: Arc<str> = Arc::from(issuer.into());

        let mut validation = Validation::new(ALGORITHM);
        validation.set_issuer(&[issuer.as_ref()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.leeway = leeway_secs;
        validation.validate_aud = false;

        Ok(Self {
            issuer,
            lifetime,
            encoding_key: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding_key: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            validation: Arc::new(validation),
        })
    }

    /// Creates a codec from the loaded configuration.
    pub fn from_config(config: &JwtConfig) -> ApiResult<Self> {
        let secret = config
            .secret
            .as_ref()
            .ok_or_else(|| ApiError::internal("Token secret is not configured"))?;
        Self::new(
            secret.expose(),
            config.issuer.clone(),
            config.lifetime(),
            config.leeway_secs,
        )
    }

    /// Issues a token for `subject`, valid from now.
    pub fn issue(&self, subject: EmployeeId, display: DisplayClaims) -> ApiResult<IssuedToken> {
        self.issue_at(subject, display, Utc::now())
    }

    /// Issues a token for `subject` as if issued at `issued_at`.
    pub fn issue_at(
        &self,
        subject: EmployeeId,
        display: DisplayClaims,
        issued_at: DateTime<Utc>,
    ) -> ApiResult<IssuedToken> {
        let claims = Claims::new(subject, display, &self.issuer, issued_at, self.lifetime);
        let expires_at = claims
            .expires_at()
            .ok_or_else(|| ApiError::internal("Token expiry out of range"))?;

        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| ApiError::internal(format!("Failed to create token: {}", e)))?;

        Ok(IssuedToken {
            token,
            expires_in: (expires_at - Utc::now()).num_seconds().max(0),
            expires_at,
        })
    }

    /// Verifies signature, issuer and expiry, and parses the subject.
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            let reason = match e.kind() {
                ErrorKind::ExpiredSignature => "token has expired",
                ErrorKind::InvalidSignature => "signature mismatch",
                ErrorKind::InvalidIssuer => "unexpected issuer",
                ErrorKind::InvalidAlgorithm => "unexpected algorithm",
                ErrorKind::MissingRequiredClaim(_) => "missing required claim",
                _ => "malformed token",
            };
            AuthError::InvalidToken(reason)
        })?;

        let subject = data
            .claims
            .subject()
            .ok_or(AuthError::InvalidToken("subject is not an employee id"))?;

        Ok(VerifiedToken {
            subject,
            claims: data.claims,
        })
    }

    /// Configured token lifetime in seconds.
    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime.num_seconds()
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("issuer", &self.issuer)
            .field("algorithm", &ALGORITHM)
            .field("lifetime_secs", &self.lifetime.num_seconds())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-that-is-long-enough-for-testing";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, "waypoint", std::time::Duration::from_secs(3600), 0).unwrap()
    }

    fn display() -> DisplayClaims {
        DisplayClaims {
            username: Some("mrossi".into()),
            email: Some("m.rossi@example.com".into()),
        }
    }

    #[test]
    fn test_round_trip() {
        let codec = codec();
        for id in [1, 2, 42, i64::MAX] {
            let issued = codec.issue(EmployeeId::new(id), display()).unwrap();
            let verified = codec.verify(&issued.token).unwrap();
            assert_eq!(verified.subject, EmployeeId::new(id));
            assert_eq!(verified.claims.display, display());
            assert!(!verified.claims.is_expired());
        }
    }

    #[test]
    fn test_expired_token() {
        let codec = codec();
        let issued_at = Utc::now() - Duration::seconds(3600 + 5);
        let issued = codec
            .issue_at(EmployeeId::new(1), display(), issued_at)
            .unwrap();

        assert_eq!(
            codec.verify(&issued.token),
            Err(AuthError::InvalidToken("token has expired"))
        );
    }

    #[test]
    fn test_tamper_every_position() {
        let codec = codec();
        let token = codec.issue(EmployeeId::new(7), display()).unwrap().token;

        for i in 0..token.len() {
            let mut bytes = token.clone().into_bytes();
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();

            assert!(
                matches!(codec.verify(&tampered), Err(AuthError::InvalidToken(_))),
                "tampered byte {} was accepted",
                i
            );
        }
    }

    #[test]
    fn test_wrong_secret() {
        let other = TokenCodec::new(
            "another-secret-key-that-is-long-enough",
            "waypoint",
            std::time::Duration::from_secs(3600),
            0,
        )
        .unwrap();
        let token = other.issue(EmployeeId::new(1), display()).unwrap().token;

        assert_eq!(
            codec().verify(&token),
            Err(AuthError::InvalidToken("signature mismatch"))
        );
    }

    #[test]
    fn test_wrong_issuer() {
        let other = TokenCodec::new(SECRET, "someone-else", std::time::Duration::from_secs(3600), 0)
            .unwrap();
        let token = other.issue(EmployeeId::new(1), display()).unwrap().token;
        assert!(codec().verify(&token).is_err());
    }

    #[test]
    fn test_malformed() {
        let codec = codec();
        assert!(codec.verify("").is_err());
        assert!(codec.verify("invalid.token.here").is_err());
        assert!(codec.verify("a.b").is_err());
    }

    #[test]
    fn test_token_has_no_secret_or_role() {
        let issued = codec().issue(EmployeeId::new(3), display()).unwrap();
        let payload = issued.token.split('.').nth(1).unwrap().to_string();
        assert!(!payload.is_empty());
        assert!(!format!("{:?}", issued).contains(&issued.token));
        assert!(!format!("{:?}", codec()).contains(SECRET));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(TokenCodec::new("  ", "waypoint", std::time::Duration::from_secs(60), 0).is_err());
    }
}
