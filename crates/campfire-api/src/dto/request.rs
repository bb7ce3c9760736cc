//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use campfire_core::error::AppError;
use campfire_entity::partner::{CreatePartner, UpdatePartner};

/// Runs `validator` rules and maps failures to a 400.
pub fn validate<T: Validate>(req: &T) -> Result<(), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Facebook access token, from the query string or a JSON body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacebookTokenRequest {
    /// User access token issued by Facebook.
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Create partner request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePartnerRequest {
    /// Unique name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Image path or URL.
    #[validate(length(min = 1))]
    pub image: String,
    /// Featured flag, defaults to true.
    pub featured: Option<bool>,
    /// Description.
    #[validate(length(min = 1))]
    pub description: String,
}

impl From<CreatePartnerRequest> for CreatePartner {
    fn from(req: CreatePartnerRequest) -> Self {
        Self {
            name: req.name,
            image: req.image,
            featured: req.featured.unwrap_or(true),
            description: req.description,
        }
    }
}

/// Update partner request. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePartnerRequest {
    /// New name.
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    /// New image.
    #[validate(length(min = 1))]
    pub image: Option<String>,
    /// New featured flag.
    pub featured: Option<bool>,
    /// New description.
    #[validate(length(min = 1))]
    pub description: Option<String>,
}

impl From<UpdatePartnerRequest> for UpdatePartner {
    fn from(req: UpdatePartnerRequest) -> Self {
        Self {
            name: req.name,
            image: req.image,
            featured: req.featured,
            description: req.description,
        }
    }
}
