//! In-memory partner store, paired with the in-memory identity store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use campfire_core::error::AppError;
use campfire_core::result::AppResult;
use campfire_entity::partner::{CreatePartner, Partner, UpdatePartner};

use super::partner::PartnerStore;

/// Partners held in process memory. Name uniqueness is checked under the
/// write lock.
#[derive(Debug, Clone, Default)]
pub struct MemoryPartnerStore {
    partners: Arc<RwLock<HashMap<Uuid, Partner>>>,
}

impl MemoryPartnerStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn name_conflict(name: &str) -> AppError {
    AppError::conflict(format!("Partner '{name}' already exists"))
}

#[async_trait]
impl PartnerStore for MemoryPartnerStore {
    async fn find_all(&self) -> AppResult<Vec<Partner>> {
        let mut all: Vec<Partner> = self.partners.read().await.values().cloned().collect();
        all.sort_by_key(|p| p.created_at);
        Ok(all)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Partner>> {
        Ok(self.partners.read().await.get(&id).cloned())
    }

    async fn create(&self, data: &CreatePartner) -> AppResult<Partner> {
        let mut partners = self.partners.write().await;
        if partners.values().any(|p| p.name == data.name) {
            return Err(name_conflict(&data.name));
        }

        let now = Utc::now();
        let partner = Partner {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            image: data.image.clone(),
            featured: data.featured,
            description: data.description.clone(),
            created_at: now,
            updated_at: now,
        };
        partners.insert(partner.id, partner.clone());
        Ok(partner)
    }

    async fn update(&self, id: Uuid, data: &UpdatePartner) -> AppResult<Option<Partner>> {
        let mut partners = self.partners.write().await;
        if let Some(name) = data.name.as_deref()
            && partners.values().any(|p| p.id != id && p.name == name)
        {
            return Err(name_conflict(name));
        }

        let Some(partner) = partners.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &data.name {
            partner.name = name.clone();
        }
        if let Some(image) = &data.image {
            partner.image = image.clone();
        }
        if let Some(featured) = data.featured {
            partner.featured = featured;
        }
        if let Some(description) = &data.description {
            partner.description = description.clone();
        }
        partner.updated_at = Utc::now();
        Ok(Some(partner.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.partners.write().await.remove(&id).is_some())
    }
}
