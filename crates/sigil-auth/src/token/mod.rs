//! Token generation, signing, and verification.
//!
//! Two independent units live here. [`TokenGenerator`] mints opaque random
//! tokens with no embedded structure. [`TokenSigner`] and [`TokenVerifier`]
//! handle compact signed tokens (JWT, HS256 only) carrying a [`ClaimSet`].

pub mod claims;
pub mod generator;
pub mod key;
pub mod signer;
pub mod verifier;

pub use claims::{ClaimSet, ClaimSetBuilder};
pub use generator::{OpaqueToken, TOKEN_LEN, TokenGenerator};
pub use key::{KeyError, SecretKey};
pub use signer::{SignError, TokenSigner};
pub use verifier::{TokenVerifier, VerificationError};
