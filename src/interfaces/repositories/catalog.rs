use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    entities::catalog::{CatalogKind, ProjectType, Technology},
    errors::AppError,
    repositories::sqlx_repo::SqlxCatalogRepo,
};

/// Read-side lookups for the reference tables a project points at.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_types(&self) -> Result<Vec<ProjectType>, AppError>;
    async fn get_type_by_id(&self, id: i64) -> Result<Option<ProjectType>, AppError>;
    async fn type_exists(&self, id: i64) -> Result<bool, AppError>;
    async fn list_technologies(&self) -> Result<Vec<Technology>, AppError>;

    /// The subset of `ids` that has a matching technology row.
    async fn existing_technology_ids(&self, ids: &[i64]) -> Result<Vec<i64>, AppError>;

    async fn create_technology(&self, name: &str) -> Result<Technology, AppError>;

    async fn create_type(&self, name: &str) -> Result<ProjectType, AppError>;

    /// `NotFound` when no type has this id.
    async fn update_type(&self, id: i64, name: &str) -> Result<ProjectType, AppError>;

    /// Projects pointing at the type keep existing with no type.
    async fn delete_type(&self, id: i64) -> Result<(), AppError>;

    async fn get_technology_by_id(&self, id: i64) -> Result<Option<Technology>, AppError>;
    async fn update_technology(&self, id: i64, name: &str) -> Result<Technology, AppError>;

    /// Also detaches the technology from every project.
    async fn delete_technology(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
impl<T: CatalogRepository + ?Sized> CatalogRepository for Arc<T> {
    async fn list_types(&self) -> Result<Vec<ProjectType>, AppError> {
        (**self).list_types().await
    }

    async fn get_type_by_id(&self, id: i64) -> Result<Option<ProjectType>, AppError> {
        (**self).get_type_by_id(id).await
    }

    async fn type_exists(&self, id: i64) -> Result<bool, AppError> {
        (**self).type_exists(id).await
    }

    async fn list_technologies(&self) -> Result<Vec<Technology>, AppError> {
        (**self).list_technologies().await
    }

    async fn existing_technology_ids(&self, ids: &[i64]) -> Result<Vec<i64>, AppError> {
        (**self).existing_technology_ids(ids).await
    }

    async fn create_technology(&self, name: &str) -> Result<Technology, AppError> {
        (**self).create_technology(name).await
    }

    async fn create_type(&self, name: &str) -> Result<ProjectType, AppError> {
        (**self).create_type(name).await
    }

    async fn update_type(&self, id: i64, name: &str) -> Result<ProjectType, AppError> {
        (**self).update_type(id, name).await
    }

    async fn delete_type(&self, id: i64) -> Result<(), AppError> {
        (**self).delete_type(id).await
    }

    async fn get_technology_by_id(&self, id: i64) -> Result<Option<Technology>, AppError> {
        (**self).get_technology_by_id(id).await
    }

    async fn update_technology(&self, id: i64, name: &str) -> Result<Technology, AppError> {
        (**self).update_technology(id, name).await
    }

    async fn delete_technology(&self, id: i64) -> Result<(), AppError> {
        (**self).delete_technology(id).await
    }
}

impl SqlxCatalogRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxCatalogRepo { pool }
    }
}

#[async_trait]
impl CatalogRepository for SqlxCatalogRepo {
    async fn list_types(&self) -> Result<Vec<ProjectType>, AppError> {
        let types = sqlx::query_as::<_, ProjectType>("SELECT id, name FROM types ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(types)
    }

    async fn get_type_by_id(&self, id: i64) -> Result<Option<ProjectType>, AppError> {
        let project_type = sqlx::query_as::<_, ProjectType>("SELECT id, name FROM types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(project_type)
    }

    async fn type_exists(&self, id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM types WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn list_technologies(&self) -> Result<Vec<Technology>, AppError> {
        let technologies = sqlx::query_as::<_, Technology>("SELECT id, name FROM technologies ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(technologies)
    }

    async fn existing_technology_ids(&self, ids: &[i64]) -> Result<Vec<i64>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let found: Vec<i64> = sqlx::query_scalar("SELECT id FROM technologies WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(found)
    }

    async fn create_technology(&self, name: &str) -> Result<Technology, AppError> {
        let technology = sqlx::query_as::<_, Technology>(
            "INSERT INTO technologies (name, created_at, updated_at) VALUES ($1, NOW(), NOW()) RETURNING id, name"
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(technology)
    }

    async fn create_type(&self, name: &str) -> Result<ProjectType, AppError> {
        let project_type = sqlx::query_as::<_, ProjectType>(
            "INSERT INTO types (name, created_at, updated_at) VALUES ($1, NOW(), NOW()) RETURNING id, name"
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(project_type)
    }

    async fn update_type(&self, id: i64, name: &str) -> Result<ProjectType, AppError> {
        sqlx::query_as::<_, ProjectType>(
            "UPDATE types SET name = $1, updated_at = NOW() WHERE id = $2 RETURNING id, name"
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(CatalogKind::Type.not_found()))
    }

    async fn delete_type(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(CatalogKind::Type.not_found()));
        }

        Ok(())
    }

    async fn get_technology_by_id(&self, id: i64) -> Result<Option<Technology>, AppError> {
        let technology = sqlx::query_as::<_, Technology>("SELECT id, name FROM technologies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(technology)
    }

    async fn update_technology(&self, id: i64, name: &str) -> Result<Technology, AppError> {
        sqlx::query_as::<_, Technology>(
            "UPDATE technologies SET name = $1, updated_at = NOW() WHERE id = $2 RETURNING id, name"
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(CatalogKind::Technology.not_found()))
    }

    async fn delete_technology(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM technologies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(CatalogKind::Technology.not_found()));
        }

        Ok(())
    }
}
