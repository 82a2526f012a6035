//! Signed bearer token verification.
//!
//! [`TokenVerifier`] binds one symmetric key at construction and decides,
//! per call, whether an input string is a validly signed HS256 token. The
//! checks run in order and stop at the first failure:
//!
//! 1. absent or empty input
//! 2. structural parse (three base64url segments, valid JSON)
//! 3. header algorithm against the HS256 allow-list
//! 4. signature over `header.payload` against the bound key
//! 5. temporal claims (`exp`, `nbf`) against the injected clock
//!
//! Claims are exposed only when every check passes. The token's declared
//! algorithm is never trusted: anything other than HS256 is refused before
//! any claim is released, `none` included.

use std::collections::HashSet;
use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use crate::clock::{Clock, SystemClock};

use super::claims::ClaimSet;
use super::key::SecretKey;

/// Why a token failed verification.
///
/// Callers should treat every non-[`Internal`] variant uniformly as
/// "unauthenticated" — the distinction exists for diagnostics, not for the
/// response body. [`Internal`] is different: it signals a fault in the
/// verifier itself, not a property of the token.
///
/// [`Internal`]: VerificationError::Internal
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    /// No token was supplied.
    #[error("no token supplied")]
    NoToken,

    /// The token is structurally invalid (segments, encoding, or JSON).
    #[error("malformed token")]
    Malformed,

    /// The signature does not verify against the bound key.
    #[error("token signature mismatch")]
    BadSignature,

    /// The token declares an algorithm outside the allow-list.
    #[error("token algorithm not allowed")]
    UnsupportedAlgorithm,

    /// The token's expiry is in the past.
    #[error("token expired")]
    Expired,

    /// The token's not-before time is in the future.
    #[error("token not yet valid")]
    NotYetValid,

    /// An unexpected fault inside the verifier (not a token property).
    #[error("verification fault: {message}")]
    Internal {
        /// Description of the fault.
        message: String,
    },
}

impl VerificationError {
    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` for faults that are not verification outcomes.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }
}

/// Verifier for compact signed tokens.
///
/// Holds only immutable key material and an injected clock, so a single
/// instance is shared across request handlers (`Send + Sync`) without
/// synchronization. Each [`verify`](Self::verify) call is a pure function
/// of `(key, token, clock)`.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenVerifier {
    /// Creates a verifier bound to `key`, using the system clock.
    #[must_use]
    pub fn new(key: &SecretKey) -> Self {
        // Temporal validation is disabled in the library and performed
        // explicitly below so the clock can be injected. The algorithm
        // allow-list stays with the library: only HS256 passes.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            validation,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock used for temporal claims.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Verifies `token` and returns its claims on success.
    ///
    /// `token` may be absent, empty, arbitrary garbage, or a well-formed
    /// but mis-signed token; none of these panic.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as a [`VerificationError`]. No
    /// claim data is released on any failure path.
    pub fn verify(&self, token: Option<&str>) -> Result<ClaimSet, VerificationError> {
        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => return Err(VerificationError::NoToken),
        };

        let claims = decode::<ClaimSet>(token, &self.decoding_key, &self.validation)
            .map_err(map_decode_error)?
            .claims;

        let now = self.clock.now_unix();
        if let Some(exp) = claims.exp
            && exp <= now
        {
            return Err(VerificationError::Expired);
        }
        if let Some(nbf) = claims.nbf
            && nbf > now
        {
            return Err(VerificationError::NotYetValid);
        }

        Ok(claims)
    }
}

/// Maps jsonwebtoken decode errors onto the verification taxonomy.
///
/// Key- and crypto-level faults map to `Internal`: the key was validated at
/// construction, so hitting one here is a verifier fault rather than a
/// property of the supplied token.
fn map_decode_error(error: jsonwebtoken::errors::Error) -> VerificationError {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::InvalidSignature => VerificationError::BadSignature,
        ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName
        | ErrorKind::MissingAlgorithm => VerificationError::UnsupportedAlgorithm,
        ErrorKind::ExpiredSignature => VerificationError::Expired,
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_)
        | ErrorKind::MissingRequiredClaim(_) => VerificationError::Malformed,
        _ => VerificationError::internal(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use jsonwebtoken::{EncodingKey, Header, encode};

    use crate::token::TokenSigner;

    use super::*;

    /// Clock pinned to a fixed instant.
    struct FixedClock(i64);

    impl Clock for FixedClock {
        fn now_unix(&self) -> i64 {
            self.0
        }
    }

    fn key(material: &[u8]) -> SecretKey {
        SecretKey::from_bytes(material.to_vec()).expect("valid key")
    }

    fn verifier_at(material: &[u8], now: i64) -> TokenVerifier {
        TokenVerifier::new(&key(material)).with_clock(Arc::new(FixedClock(now)))
    }

    #[test]
    fn test_verify_absent_token() {
        let verifier = TokenVerifier::new(&key(b"test-secret"));
        assert_eq!(verifier.verify(None), Err(VerificationError::NoToken));
    }

    #[test]
    fn test_verify_empty_token() {
        let verifier = TokenVerifier::new(&key(b"test-secret"));
        assert_eq!(verifier.verify(Some("")), Err(VerificationError::NoToken));
    }

    #[test]
    fn test_verify_garbage_is_malformed() {
        let verifier = TokenVerifier::new(&key(b"test-secret"));

        for garbage in ["not-a-token", "a.b", "a.b.c.d", "!!!.???.###"] {
            assert_eq!(
                verifier.verify(Some(garbage)),
                Err(VerificationError::Malformed),
                "expected Malformed for {garbage:?}"
            );
        }
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let secret = key(b"test-secret");
        let signer = TokenSigner::new(&secret);
        let verifier = TokenVerifier::new(&secret).with_clock(Arc::new(FixedClock(1_000)));

        let claims = ClaimSet {
            sub: Some("alice".to_string()),
            exp: Some(2_000),
            ..ClaimSet::default()
        };

        let token = signer.sign(&claims).expect("sign");
        let decoded = verifier.verify(Some(&token)).expect("verify");

        assert_eq!(decoded, claims);
        assert_eq!(decoded.subject(), Some("alice"));
        assert_eq!(decoded.exp, Some(2_000));
    }

    #[test]
    fn test_verify_is_deterministic() {
        let secret = key(b"test-secret");
        let signer = TokenSigner::new(&secret);
        let verifier = TokenVerifier::new(&secret).with_clock(Arc::new(FixedClock(1_000)));

        let claims = ClaimSet::builder().subject("alice").expires_at(2_000).build();
        let token = signer.sign(&claims).expect("sign");

        assert_eq!(
            verifier.verify(Some(&token)),
            verifier.verify(Some(&token))
        );
    }

    #[test]
    fn test_wrong_key_is_bad_signature() {
        let signer = TokenSigner::new(&key(b"key-one"));
        let verifier = verifier_at(b"key-two", 1_000);

        let claims = ClaimSet {
            sub: Some("alice".to_string()),
            exp: Some(2_000),
            ..ClaimSet::default()
        };
        let token = signer.sign(&claims).expect("sign");

        assert_eq!(
            verifier.verify(Some(&token)),
            Err(VerificationError::BadSignature)
        );
    }

    #[test]
    fn test_tampered_payload_is_bad_signature() {
        let secret = key(b"test-secret");
        let signer = TokenSigner::new(&secret);
        let verifier = TokenVerifier::new(&secret).with_clock(Arc::new(FixedClock(1_000)));

        let claims = ClaimSet {
            sub: Some("alice".to_string()),
            exp: Some(2_000),
            ..ClaimSet::default()
        };
        let token = signer.sign(&claims).expect("sign");

        // Swap the payload for one claiming a different subject.
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = URL_SAFE_NO_PAD.encode(r#"{"sub":"mallory","exp":2000}"#);
        parts[1] = &forged;
        let forged_token = parts.join(".");

        assert_eq!(
            verifier.verify(Some(&forged_token)),
            Err(VerificationError::BadSignature)
        );
    }

    #[test]
    fn test_expired_token_rejected_despite_valid_signature() {
        let secret = key(b"test-secret");
        let signer = TokenSigner::new(&secret);

        let claims = ClaimSet {
            sub: Some("alice".to_string()),
            exp: Some(1_000),
            ..ClaimSet::default()
        };
        let token = signer.sign(&claims).expect("sign");

        let before = TokenVerifier::new(&secret).with_clock(Arc::new(FixedClock(500)));
        assert!(before.verify(Some(&token)).is_ok());

        let after = TokenVerifier::new(&secret).with_clock(Arc::new(FixedClock(2_000)));
        assert_eq!(
            after.verify(Some(&token)),
            Err(VerificationError::Expired)
        );

        // exp == now counts as expired: the current time must be before exp.
        let boundary = TokenVerifier::new(&secret).with_clock(Arc::new(FixedClock(1_000)));
        assert_eq!(
            boundary.verify(Some(&token)),
            Err(VerificationError::Expired)
        );
    }

    #[test]
    fn test_not_yet_valid_token_rejected() {
        let secret = key(b"test-secret");
        let signer = TokenSigner::new(&secret);

        let claims = ClaimSet {
            sub: Some("alice".to_string()),
            nbf: Some(5_000),
            exp: Some(10_000),
            ..ClaimSet::default()
        };
        let token = signer.sign(&claims).expect("sign");

        let early = TokenVerifier::new(&secret).with_clock(Arc::new(FixedClock(1_000)));
        assert_eq!(
            early.verify(Some(&token)),
            Err(VerificationError::NotYetValid)
        );

        let late = TokenVerifier::new(&secret).with_clock(Arc::new(FixedClock(6_000)));
        assert!(late.verify(Some(&token)).is_ok());
    }

    #[test]
    fn test_foreign_algorithm_rejected() {
        let secret = key(b"test-secret");
        let verifier = TokenVerifier::new(&secret).with_clock(Arc::new(FixedClock(1_000)));

        // Signed with HS384 under the same secret: the signature math would
        // pass if the declared algorithm were trusted.
        let claims = ClaimSet {
            sub: Some("alice".to_string()),
            exp: Some(2_000),
            ..ClaimSet::default()
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("encode");

        assert_eq!(
            verifier.verify(Some(&token)),
            Err(VerificationError::UnsupportedAlgorithm)
        );
    }

    #[test]
    fn test_rs256_header_rejected() {
        let verifier = verifier_at(b"test-secret", 1_000);

        // Hand-rolled token declaring RS256; must be refused by the
        // allow-list before any signature math runs.
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(r#"{"sub":"alice"}"#);
        let signature = URL_SAFE_NO_PAD.encode(b"garbage");
        let token = format!("{header}.{payload}.{signature}");

        assert_eq!(
            verifier.verify(Some(&token)),
            Err(VerificationError::UnsupportedAlgorithm)
        );
    }

    #[test]
    fn test_none_algorithm_rejected() {
        let verifier = verifier_at(b"test-secret", 1_000);

        // Classic algorithm-confusion probe: alg "none" with no signature.
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(r#"{"sub":"mallory"}"#);
        let token = format!("{header}.{payload}.");

        let result = verifier.verify(Some(&token));
        assert!(matches!(
            result,
            Err(VerificationError::Malformed) | Err(VerificationError::UnsupportedAlgorithm)
        ));
    }

    #[test]
    fn test_custom_claims_survive_verification() {
        let secret = key(b"test-secret");
        let signer = TokenSigner::new(&secret);
        let verifier = TokenVerifier::new(&secret).with_clock(Arc::new(FixedClock(1_000)));

        let claims = ClaimSet::builder()
            .subject("alice")
            .expires_at(2_000)
            .claim("role", "admin")
            .build();
        let token = signer.sign(&claims).expect("sign");

        let decoded = verifier.verify(Some(&token)).expect("verify");
        assert_eq!(decoded.get("role"), Some(&serde_json::Value::from("admin")));
    }

    #[test]
    fn test_token_without_temporal_claims_verifies() {
        let secret = key(b"test-secret");
        let signer = TokenSigner::new(&secret);
        let verifier = TokenVerifier::new(&secret).with_clock(Arc::new(FixedClock(1_000)));

        let claims = ClaimSet {
            sub: Some("alice".to_string()),
            ..ClaimSet::default()
        };
        let token = signer.sign(&claims).expect("sign");

        assert_eq!(verifier.verify(Some(&token)), Ok(claims));
    }
}
