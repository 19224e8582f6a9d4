use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

use super::error::AuthFailure;

// HMAC family accepted by the verifier, with the minimum key length (bytes)
// each algorithm needs. The token header never widens this set.
const HMAC_ALGORITHMS: [(Algorithm, usize); 3] = [
    (Algorithm::HS256, 32),
    (Algorithm::HS384, 48),
    (Algorithm::HS512, 64),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("signing key is {len} bytes; at least {min} bytes are required")]
    TooShort { len: usize, min: usize },
}

/// Shared HMAC secret.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    pub const MIN_LEN: usize = 32;

    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, KeyError> {
        let bytes = bytes.into();
        if bytes.len() < Self::MIN_LEN {
            return Err(KeyError::TooShort {
                len: bytes.len(),
                min: Self::MIN_LEN,
            });
        }
        Ok(Self(bytes))
    }

    /// The issuer signs with the UTF-8 bytes of the configured secret.
    pub fn from_secret(secret: &str) -> Result<Self, KeyError> {
        Self::new(secret.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKey(<redacted>, {} bytes)", self.0.len())
    }
}

/// Optional claim checks layered on top of signature + expiry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifierPolicy {
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub leeway_seconds: u64,
}

#[derive(Debug, Deserialize)]
struct RawClaims {
    #[serde(default)]
    sub: Option<String>,
    exp: i64,
    #[serde(default)]
    nbf: Option<i64>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    department: Option<String>,
}

/// Claims of a token whose signature and expiry have been verified.
///
/// Only [`TokenVerifier`] can build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    subject: String,
    role: Option<String>,
    department: Option<String>,
    expiry: DateTime<Utc>,
}

impl TokenClaims {
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    pub fn expiry(&self) -> DateTime<Utc> {
        self.expiry
    }
}

// Blank optional claims are treated as absent so no empty header is forwarded.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// HMAC access-token verifier.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    leeway_seconds: i64,
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(key: &SigningKey, policy: &VerifierPolicy) -> Self {
        let algorithms: Vec<Algorithm> = HMAC_ALGORITHMS
            .iter()
            .filter(|(_, min_len)| key.len() >= *min_len)
            .map(|(alg, _)| *alg)
            .collect();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = algorithms;
        // exp/nbf are checked in `verify_at` against the caller's clock.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.validate_aud = false;

        let mut required = vec!["exp"];
        if let Some(issuer) = &policy.issuer {
            validation.set_issuer(&[issuer]);
            required.push("iss");
        }
        if let Some(audience) = &policy.audience {
            validation.set_audience(&[audience]);
            validation.validate_aud = true;
            required.push("aud");
        }
        validation.set_required_spec_claims(&required);

        Self {
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            validation,
            leeway_seconds: i64::try_from(policy.leeway_seconds).unwrap_or(i64::MAX),
        }
    }

    pub fn algorithms(&self) -> &[Algorithm] {
        &self.validation.algorithms
    }

    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthFailure> {
        self.verify_at(token, Utc::now())
    }

    /// Verify `token` as of `now`.
    ///
    /// `jsonwebtoken` checks structure, the pinned algorithm set, the signature,
    /// and the optional `iss`/`aud`. This method additionally checks:
    /// - `exp` strictly after `now` (minus leeway)
    /// - `nbf`, when present, not after `now` (plus leeway)
    /// - `sub` present and not blank
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, AuthFailure> {
        let data = jsonwebtoken::decode::<RawClaims>(token, &self.decoding_key, &self.validation)?;
        let raw = data.claims;
        let now = now.timestamp();

        if raw.exp <= now.saturating_sub(self.leeway_seconds) {
            return Err(AuthFailure::Expired);
        }
        if let Some(nbf) = raw.nbf
            && nbf > now.saturating_add(self.leeway_seconds)
        {
            return Err(AuthFailure::NotYetValid);
        }

        let subject = non_blank(raw.sub).ok_or(AuthFailure::Malformed("sub"))?;
        let expiry = DateTime::from_timestamp(raw.exp, 0).ok_or(AuthFailure::Malformed("exp"))?;

        Ok(TokenClaims {
            subject,
            role: non_blank(raw.role),
            department: non_blank(raw.department),
            expiry,
        })
    }
}
