//! Session token validation.

use std::fmt;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use campfire_core::config::AuthConfig;

use super::claims::SessionClaims;

/// Why a presented token did not authenticate anyone.
///
/// Every variant is a soft failure: the caller treats them all as
/// "not authenticated". The distinction only feeds diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No bearer token was presented, or the header was not a bearer value.
    Missing,
    /// The token could not be parsed.
    Malformed,
    /// The signature does not match the configured key.
    BadSignature,
    /// The validity window has passed.
    Expired,
    /// Signature and expiry are fine but the subject no longer exists.
    UnknownUser,
}

impl Rejection {
    /// Short machine-readable reason for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Malformed => "malformed",
            Self::BadSignature => "bad_signature",
            Self::Expired => "expired",
            Self::UnknownUser => "unknown_user",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks signature and expiry of session tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self::from_secret(config.secret_key.as_bytes())
    }

    /// Creates a decoder over a raw secret.
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // Tokens live exactly one hour; no clock-skew allowance.
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Decodes `token`, mapping every validation failure to a [`Rejection`].
    pub fn decode(&self, token: &str) -> Result<SessionClaims, Rejection> {
        let claims = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => Rejection::Expired,
                JwtErrorKind::InvalidSignature | JwtErrorKind::InvalidAlgorithm => {
                    Rejection::BadSignature
                }
                _ => Rejection::Malformed,
            })?;

        // jsonwebtoken still accepts `exp == now`; the validity window is [iat, exp).
        if claims.exp <= Utc::now().timestamp() {
            return Err(Rejection::Expired);
        }
        Ok(claims)
    }
}
