//! Signed bearer token issuance.

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

use super::claims::ClaimSet;
use super::key::SecretKey;

/// Errors that can occur while signing a token.
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    /// Failed to encode the token.
    #[error("failed to encode token: {message}")]
    Encoding {
        /// Description of the encoding error.
        message: String,
    },
}

/// Mints compact HS256 tokens over a [`ClaimSet`].
///
/// Bound to one symmetric key for its lifetime; tokens it produces verify
/// under a [`TokenVerifier`] constructed from the same key.
///
/// [`TokenVerifier`]: crate::token::TokenVerifier
pub struct TokenSigner {
    encoding_key: EncodingKey,
    header: Header,
}

impl TokenSigner {
    /// Creates a signer bound to `key`.
    #[must_use]
    pub fn new(key: &SecretKey) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            header: Header::new(Algorithm::HS256),
        }
    }

    /// Signs `claims` into a compact token string.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::Encoding`] if serialization fails.
    pub fn sign(&self, claims: &ClaimSet) -> Result<String, SignError> {
        encode(&self.header, claims, &self.encoding_key).map_err(|e| SignError::Encoding {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_produces_three_segments() {
        let key = SecretKey::from_bytes(b"test-secret".to_vec()).expect("valid key");
        let signer = TokenSigner::new(&key);

        let claims = ClaimSet::builder()
            .subject("alice")
            .expires_in_seconds(3600)
            .build();
        let token = signer.sign(&claims).expect("sign");

        assert_eq!(token.split('.').count(), 3);
        assert!(token.split('.').all(|segment| !segment.is_empty()));
    }

    #[test]
    fn test_same_claims_same_key_same_token() {
        let key = SecretKey::from_bytes(b"test-secret".to_vec()).expect("valid key");
        let signer = TokenSigner::new(&key);

        let claims = ClaimSet {
            sub: Some("alice".to_string()),
            exp: Some(2_000),
            ..ClaimSet::default()
        };

        assert_eq!(
            signer.sign(&claims).expect("sign"),
            signer.sign(&claims).expect("sign")
        );
    }
}
