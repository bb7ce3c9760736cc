//! Token issuance and verification against the identity store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use campfire_core::config::AuthConfig;
use campfire_core::result::AppResult;
use campfire_entity::user::User;

use super::claims::SessionClaims;
use super::decoder::{JwtDecoder, Rejection};
use super::encoder::{IssuedToken, JwtEncoder};
use crate::store::IdentityStore;

/// Outcome of presenting a session token.
#[derive(Debug, Clone, PartialEq)]
pub enum Verification {
    /// The token is valid and its subject exists.
    Authenticated(User),
    /// The token did not authenticate anyone.
    Rejected(Rejection),
}

impl Verification {
    /// The resolved user, if any.
    pub fn into_user(self) -> Option<User> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Rejected(_) => None,
        }
    }
}

/// Issues session tokens and resolves presented ones back to users.
///
/// Built once at startup; the signing key is never rotated at runtime.
#[derive(Debug, Clone)]
pub struct TokenService {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    store: Arc<dyn IdentityStore>,
}

impl TokenService {
    /// Creates a token service from auth configuration.
    pub fn new(config: &AuthConfig, store: Arc<dyn IdentityStore>) -> Self {
        Self {
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
            store,
        }
    }

    /// Issues a token for `user`, valid for one hour from now.
    pub fn issue(&self, user: &User) -> AppResult<IssuedToken> {
        self.issue_at(user, Utc::now())
    }

    /// Issues a token as if at `issued_at`.
    ///
    /// Identical user, key and instant always produce the same token.
    pub fn issue_at(&self, user: &User, issued_at: DateTime<Utc>) -> AppResult<IssuedToken> {
        let claims = SessionClaims::for_user(user, issued_at);
        let issued = self.encoder.encode(&claims)?;
        debug!(user_id = %user.id, expires_at = %issued.expires_at, "Session token issued");
        Ok(issued)
    }

    /// Verifies the value of an `Authorization` header.
    ///
    /// A missing header or a non-bearer value is rejected the same way as an
    /// invalid token.
    pub async fn verify_bearer(&self, header: Option<&str>) -> AppResult<Verification> {
        match header.and_then(bearer_token) {
            Some(token) => self.verify(token).await,
            None => {
                debug!(reason = %Rejection::Missing, "Session token rejected");
                Ok(Verification::Rejected(Rejection::Missing))
            }
        }
    }

    /// Checks signature and expiry, then resolves the subject in the store.
    ///
    /// Only a store failure is an `Err`; every other outcome is a
    /// [`Verification`].
    pub async fn verify(&self, token: &str) -> AppResult<Verification> {
        let claims = match self.decoder.decode(token) {
            Ok(claims) => claims,
            Err(rejection) => {
                debug!(reason = %rejection, "Session token rejected");
                return Ok(Verification::Rejected(rejection));
            }
        };
        debug!(claims = ?claims, "Session token payload");

        match self.store.find_by_id(claims.user_id()).await? {
            Some(user) => Ok(Verification::Authenticated(user)),
            None => {
                debug!(user_id = %claims.user_id(), reason = %Rejection::UnknownUser, "Session token rejected");
                Ok(Verification::Rejected(Rejection::UnknownUser))
            }
        }
    }
}

/// Extracts the token from a `Bearer <token>` header value.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
