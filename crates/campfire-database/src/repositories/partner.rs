//! Partner storage: the [`PartnerStore`] trait and its Postgres repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use campfire_core::error::{AppError, ErrorKind};
use campfire_core::result::AppResult;
use campfire_entity::partner::{CreatePartner, Partner, UpdatePartner};

/// CRUD access to partners, independent of the backing store.
#[async_trait]
pub trait PartnerStore: Send + Sync + std::fmt::Debug + 'static {
    /// List every partner, oldest first.
    async fn find_all(&self) -> AppResult<Vec<Partner>>;

    /// Find a partner by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Partner>>;

    /// Create a partner. A duplicate name is a conflict.
    async fn create(&self, data: &CreatePartner) -> AppResult<Partner>;

    /// Apply a partial update. Returns `None` when the partner does not exist.
    async fn update(&self, id: Uuid, data: &UpdatePartner) -> AppResult<Option<Partner>>;

    /// Delete a partner. Returns `true` if it existed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Repository for partner CRUD operations.
#[derive(Debug, Clone)]
pub struct PartnerRepository {
    pool: PgPool,
}

impl PartnerRepository {
    /// Create a new partner repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PartnerStore for PartnerRepository {
    async fn find_all(&self) -> AppResult<Vec<Partner>> {
        sqlx::query_as::<_, Partner>("SELECT * FROM partners ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list partners", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Partner>> {
        sqlx::query_as::<_, Partner>("SELECT * FROM partners WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find partner", e))
    }

    async fn create(&self, data: &CreatePartner) -> AppResult<Partner> {
        sqlx::query_as::<_, Partner>(
            "INSERT INTO partners (name, image, featured, description) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.image)
        .bind(data.featured)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_name_conflict(e, &data.name, "Failed to create partner"))
    }

    async fn update(&self, id: Uuid, data: &UpdatePartner) -> AppResult<Option<Partner>> {
        let name = data.name.clone().unwrap_or_default();
        sqlx::query_as::<_, Partner>(
            "UPDATE partners SET name = COALESCE($2, name), \
                                 image = COALESCE($3, image), \
                                 featured = COALESCE($4, featured), \
                                 description = COALESCE($5, description), \
                                 updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.image)
        .bind(data.featured)
        .bind(&data.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_name_conflict(e, &name, "Failed to update partner"))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM partners WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete partner", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}

fn map_name_conflict(e: sqlx::Error, name: &str, context: &str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("partners_name_key") => {
            AppError::conflict(format!("Partner '{name}' already exists"))
        }
        _ => AppError::with_source(ErrorKind::Database, context.to_string(), e),
    }
}
