//! # sigil-auth
//!
//! Authentication token core for the Sigil server.
//!
//! This crate provides:
//! - Opaque random token generation for verification and reset flows
//! - Signed bearer token (JWT, HS256) issuance and verification
//! - An Axum extractor that authenticates incoming requests
//!
//! ## Overview
//!
//! The crate is built around two independent units. [`token::TokenGenerator`]
//! mints unguessable opaque tokens from the operating system's CSPRNG.
//! [`token::TokenVerifier`] binds one symmetric key for its lifetime and
//! decides, for an arbitrary input string, whether it is a validly signed
//! token — exposing claims only when every check passes.
//!
//! ## Modules
//!
//! - [`clock`] - Injectable time source for deterministic verification
//! - [`config`] - Auth configuration (secret, issuer, token lifetime)
//! - [`error`] - Crate-level error type with HTTP responses
//! - [`middleware`] - Bearer token extraction for Axum handlers
//! - [`token`] - Token generation, signing, and verification

pub mod clock;
pub mod config;
pub mod error;
pub mod middleware;
pub mod token;

pub use clock::{Clock, SystemClock};
pub use config::{AuthConfig, ConfigError};
pub use error::AuthError;
pub use middleware::{AuthState, BearerAuth};
pub use token::{
    ClaimSet, KeyError, OpaqueToken, SecretKey, SignError, TokenGenerator, TokenSigner,
    TokenVerifier, VerificationError,
};

/// Type alias for authentication results.
pub type AuthResult<T> = Result<T, AuthError>;
