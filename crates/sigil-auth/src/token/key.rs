//! Symmetric key material for token signing and verification.

use std::fmt;

/// Errors raised when loading key material.
///
/// These are construction-time errors: a service that cannot load its key
/// must fail startup, not defer the failure to the first request.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeyError {
    /// The supplied key material was empty.
    #[error("secret key material must not be empty")]
    Empty,
}

/// Opaque symmetric key used to sign and verify bearer tokens.
///
/// Immutable once loaded. The raw bytes are reachable only inside this
/// crate; `Debug` output is redacted and no serde implementations exist, so
/// the key cannot end up in logs or serialized state by accident.
#[derive(Clone)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    /// Loads key material, rejecting empty input.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Empty`] if `bytes` is empty.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, KeyError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(KeyError::Empty);
        }
        Ok(Self(bytes))
    }

    /// Raw key bytes, for constructing signing/verification handles.
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}
