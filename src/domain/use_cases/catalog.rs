use validator::Validate;

use crate::{
    entities::{
        catalog::{CatalogItemRequest, CatalogKind, ProjectType, Technology},
        flash::ActionResponse,
    },
    errors::AppError,
    repositories::catalog::CatalogRepository,
    use_cases::extractors::RequestContext,
};

/// Admin CRUD over the type and technology reference tables.
pub struct CatalogHandler<C>
where
    C: CatalogRepository,
{
    pub catalog_repo: C,
}

impl<C> CatalogHandler<C>
where
    C: CatalogRepository,
{
    pub fn new(catalog_repo: C) -> Self {
        CatalogHandler { catalog_repo }
    }

    // ───── Types ────────────────────────────────────────────────────────

    pub async fn list_types(&self, _ctx: &RequestContext) -> Result<Vec<ProjectType>, AppError> {
        self.catalog_repo.list_types().await
    }

    pub async fn store_type(&self, ctx: &RequestContext, request: CatalogItemRequest) -> Result<ActionResponse, AppError> {
        let name = validated_name(request)?;
        let project_type = self.catalog_repo.create_type(&name).await?;

        tracing::info!(actor = %ctx.subject, type_id = project_type.id, "Type created");
        Ok(stored(CatalogKind::Type, project_type.id))
    }

    pub async fn show_type(&self, _ctx: &RequestContext, id: i64) -> Result<ProjectType, AppError> {
        self.catalog_repo
            .get_type_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(CatalogKind::Type.not_found()))
    }

    pub async fn update_type(&self, ctx: &RequestContext, id: i64, request: CatalogItemRequest) -> Result<ActionResponse, AppError> {
        let name = validated_name(request)?;
        self.catalog_repo.update_type(id, &name).await?;

        tracing::info!(actor = %ctx.subject, type_id = id, "Type updated");
        Ok(modified(CatalogKind::Type, id))
    }

    pub async fn destroy_type(&self, ctx: &RequestContext, id: i64) -> Result<ActionResponse, AppError> {
        self.catalog_repo.delete_type(id).await?;

        tracing::info!(actor = %ctx.subject, type_id = id, "Type deleted");
        Ok(deleted(CatalogKind::Type))
    }

    // ───── Technologies ─────────────────────────────────────────────────

    pub async fn list_technologies(&self, _ctx: &RequestContext) -> Result<Vec<Technology>, AppError> {
        self.catalog_repo.list_technologies().await
    }

    pub async fn store_technology(&self, ctx: &RequestContext, request: CatalogItemRequest) -> Result<ActionResponse, AppError> {
        let name = validated_name(request)?;
        let technology = self.catalog_repo.create_technology(&name).await?;

        tracing::info!(actor = %ctx.subject, technology_id = technology.id, "Technology created");
        Ok(stored(CatalogKind::Technology, technology.id))
    }

    pub async fn show_technology(&self, _ctx: &RequestContext, id: i64) -> Result<Technology, AppError> {
        self.catalog_repo
            .get_technology_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(CatalogKind::Technology.not_found()))
    }

    pub async fn update_technology(&self, ctx: &RequestContext, id: i64, request: CatalogItemRequest) -> Result<ActionResponse, AppError> {
        let name = validated_name(request)?;
        self.catalog_repo.update_technology(id, &name).await?;

        tracing::info!(actor = %ctx.subject, technology_id = id, "Technology updated");
        Ok(modified(CatalogKind::Technology, id))
    }

    /// Hard delete; projects lose the technology from their set.
    pub async fn destroy_technology(&self, ctx: &RequestContext, id: i64) -> Result<ActionResponse, AppError> {
        self.catalog_repo.delete_technology(id).await?;

        tracing::info!(actor = %ctx.subject, technology_id = id, "Technology deleted");
        Ok(deleted(CatalogKind::Technology))
    }
}

fn validated_name(request: CatalogItemRequest) -> Result<String, AppError> {
    let request = request.normalized();
    request.validate()?;

    // validate() rejects a missing name
    request
        .name
        .ok_or_else(|| AppError::InternalError("name missing after validation".into()))
}

fn item_path(kind: CatalogKind, id: i64) -> String {
    format!("{}/{}", kind.path(), id)
}

fn stored(kind: CatalogKind, id: i64) -> ActionResponse {
    ActionResponse::success(Some(id), item_path(kind, id), format!("{} successfully inserted", kind.label()))
}

fn modified(kind: CatalogKind, id: i64) -> ActionResponse {
    ActionResponse::success(Some(id), item_path(kind, id), format!("{} successfully modified", kind.label()))
}

fn deleted(kind: CatalogKind) -> ActionResponse {
    ActionResponse::success(None, kind.path(), format!("{} successfully deleted", kind.label()))
}
