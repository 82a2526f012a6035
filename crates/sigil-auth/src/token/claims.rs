//! Decoded token claims.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// Claims carried by a signed bearer token.
///
/// A `ClaimSet` is only ever produced by [`TokenVerifier::verify`] after the
/// token's signature and structure have been validated, or built locally for
/// signing. The standard temporal claims are optional; custom claims are
/// preserved verbatim.
///
/// [`TokenVerifier::verify`]: crate::token::TokenVerifier::verify
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClaimSet {
    /// Subject (user identifier).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issued at (Unix timestamp).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Not valid before (Unix timestamp).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Token ID (unique per issued token).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Any non-standard claims, preserved as-is.
    #[serde(flatten)]
    pub custom: BTreeMap<String, Value>,
}

impl ClaimSet {
    /// Creates a new builder for a claim set.
    #[must_use]
    pub fn builder() -> ClaimSetBuilder {
        ClaimSetBuilder::new()
    }

    /// Returns the subject claim, if present.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    /// Returns a custom claim by name, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.custom.get(name)
    }
}

/// Builder for [`ClaimSet`].
///
/// Stamps `iat` and a fresh `jti` at build time.
#[derive(Debug, Default)]
pub struct ClaimSetBuilder {
    sub: Option<String>,
    exp: Option<i64>,
    nbf: Option<i64>,
    custom: BTreeMap<String, Value>,
}

impl ClaimSetBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Sets the subject.
    #[must_use]
    pub fn subject(mut self, sub: impl Into<String>) -> Self {
        self.sub = Some(sub.into());
        self
    }

    /// Sets the expiration as an absolute Unix timestamp.
    #[must_use]
    pub fn expires_at(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Sets the expiration relative to now.
    #[must_use]
    pub fn expires_in_seconds(mut self, seconds: i64) -> Self {
        self.exp = Some(OffsetDateTime::now_utc().unix_timestamp() + seconds);
        self
    }

    /// Sets the not-before time as an absolute Unix timestamp.
    #[must_use]
    pub fn not_before(mut self, nbf: i64) -> Self {
        self.nbf = Some(nbf);
        self
    }

    /// Adds a custom claim.
    #[must_use]
    pub fn claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom.insert(name.into(), value.into());
        self
    }

    /// Builds the claim set.
    #[must_use]
    pub fn build(self) -> ClaimSet {
        ClaimSet {
            sub: self.sub,
            iat: Some(OffsetDateTime::now_utc().unix_timestamp()),
            exp: self.exp,
            nbf: self.nbf,
            jti: Some(uuid::Uuid::new_v4().to_string()),
            custom: self.custom,
        }
    }
}
