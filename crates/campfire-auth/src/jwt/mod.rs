//! Session token encoding, decoding, and verification against the store.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod service;

pub use claims::{SESSION_TTL_SECONDS, SessionClaims};
pub use decoder::{JwtDecoder, Rejection};
pub use encoder::{IssuedToken, JwtEncoder};
pub use service::{TokenService, Verification};
