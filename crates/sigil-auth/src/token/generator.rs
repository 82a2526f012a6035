//! Opaque token generation.
//!
//! Opaque tokens are unguessable random identifiers used as bearer secrets
//! in verification and reset flows (e.g. email verification links). They
//! carry no structure and no claims.
//!
//! # Security
//!
//! - Entropy comes from the operating system CSPRNG via [`OsRng`]; the
//!   generator is never seeded from userspace
//! - Collaborators that persist tokens must store [`OpaqueToken::digest`],
//!   never the plaintext

use std::fmt;

use rand::RngCore;
use rand::rngs::OsRng;
use serde::Serialize;

/// Entropy per token, in bytes. Hex encoding doubles this in characters.
const TOKEN_BYTES: usize = 16;

/// Length of an encoded opaque token in characters.
pub const TOKEN_LEN: usize = TOKEN_BYTES * 2;

/// A random opaque token: exactly 32 lowercase hex characters.
///
/// Safe to embed in URLs. The value itself is the secret, so it is returned
/// to the requesting caller and otherwise only ever handled as a digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OpaqueToken(String);

impl OpaqueToken {
    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// SHA-256 fingerprint of the token, hex-encoded.
    ///
    /// This is what gets persisted and compared; the plaintext token is
    /// never stored.
    #[must_use]
    pub fn digest(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(self.0.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl fmt::Display for OpaqueToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generator for [`OpaqueToken`]s.
///
/// Holds no state of its own: every call draws fresh bytes from the
/// process-wide OS entropy source, which is safe for concurrent use from
/// any number of tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenGenerator;

impl TokenGenerator {
    /// Creates a new generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Generates a fresh opaque token.
    ///
    /// # Panics
    ///
    /// Aborts if the OS entropy source is unavailable. A process that
    /// cannot read secure randomness must not issue secrets, so there is
    /// deliberately no weaker fallback.
    #[must_use]
    pub fn generate(&self) -> OpaqueToken {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        OpaqueToken(hex::encode(bytes))
    }
}
