//! Bearer token authentication extractor.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::get};
//! use sigil_auth::middleware::{AuthState, BearerAuth};
//!
//! async fn protected_handler(BearerAuth(claims): BearerAuth) -> String {
//!     format!("Hello, {}!", claims.subject().unwrap_or("anonymous"))
//! }
//!
//! let app = Router::new()
//!     .route("/protected", get(protected_handler))
//!     .with_state(auth_state);
//! ```

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::AuthError;
use crate::token::{ClaimSet, TokenVerifier};

/// State required for bearer token authentication.
///
/// Include this in your application state and expose it to the
/// [`BearerAuth`] extractor via `FromRef`.
#[derive(Clone)]
pub struct AuthState {
    /// Verifier shared by all request handlers.
    pub verifier: Arc<TokenVerifier>,
}

impl AuthState {
    /// Creates a new auth state.
    #[must_use]
    pub fn new(verifier: Arc<TokenVerifier>) -> Self {
        Self { verifier }
    }
}

/// Axum extractor that validates a Bearer token and yields its claims.
///
/// Extracts `Authorization: Bearer <token>` — a missing header feeds the
/// verifier's no-token path — and verifies it against the shared
/// [`TokenVerifier`]. Every rejected credential produces the same 401
/// response; the specific failure kind is logged at debug level only.
/// Verifier-internal faults surface as 500 instead of masquerading as an
/// authentication failure.
pub struct BearerAuth(pub ClaimSet);

impl<S> FromRequestParts<S> for BearerAuth
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty());

        match auth_state.verifier.verify(token) {
            Ok(claims) => {
                tracing::debug!(
                    subject = claims.subject().unwrap_or("<none>"),
                    "Token validated"
                );
                Ok(BearerAuth(claims))
            }
            Err(err) if err.is_internal() => {
                tracing::error!(error = %err, "Verifier fault");
                Err(AuthError::internal(err.to_string()))
            }
            Err(err) => {
                tracing::debug!(error = %err, "Token rejected");
                Err(AuthError::unauthorized("invalid or missing bearer token"))
            }
        }
    }
}
