//! Partner entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A partner organisation listed by the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Partner {
    /// Unique partner identifier.
    pub id: Uuid,
    /// Unique partner name.
    pub name: String,
    /// Image path or URL.
    pub image: String,
    /// Whether the partner is featured on the landing page.
    pub featured: bool,
    /// Free-form description.
    pub description: String,
    /// When the partner was created.
    pub created_at: DateTime<Utc>,
    /// When the partner was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a partner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePartner {
    /// Unique partner name.
    pub name: String,
    /// Image path or URL.
    pub image: String,
    /// Featured flag; partners are featured unless stated otherwise.
    #[serde(default = "default_featured")]
    pub featured: bool,
    /// Free-form description.
    pub description: String,
}

/// Partial update for an existing partner. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePartner {
    /// New name.
    pub name: Option<String>,
    /// New image.
    pub image: Option<String>,
    /// New featured flag.
    pub featured: Option<bool>,
    /// New description.
    pub description: Option<String>,
}

impl UpdatePartner {
    /// Returns true when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.image.is_none()
            && self.featured.is_none()
            && self.description.is_none()
    }
}

fn default_featured() -> bool {
    true
}
