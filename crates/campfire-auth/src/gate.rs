//! Admin authorization check.

use tracing::warn;

use campfire_core::error::AppError;
use campfire_entity::user::User;

/// Message returned to clients denied an admin-only operation.
pub const NOT_AUTHORIZED_MESSAGE: &str = "You are not authorized to perform this operation!";

/// Permits a request iff the resolved user's privilege flag is set.
///
/// Stateless: each call is independent and evaluated once per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationGate;

impl AuthorizationGate {
    /// Creates the gate.
    pub fn new() -> Self {
        Self
    }

    /// Returns `Ok(())` if `user.admin` is true, otherwise a 403
    /// [`Authorization`](campfire_core::error::ErrorKind::Authorization) error.
    pub fn authorize(&self, user: &User) -> Result<(), AppError> {
        if user.is_admin() {
            return Ok(());
        }
        warn!(user_id = %user.id, "Admin operation denied");
        Err(AppError::authorization(NOT_AUTHORIZED_MESSAGE))
    }
}
