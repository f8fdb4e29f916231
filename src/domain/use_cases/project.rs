use validator::{Validate, ValidationErrors};

use crate::{
    constants::{
        FLASH_PROJECT_DELETED, FLASH_PROJECT_INSERTED, FLASH_PROJECT_MODIFIED,
        FLASH_PROJECT_RESTORED, PROJECTS_PATH,
    },
    entities::{
        flash::ActionResponse,
        project::{
            new_validation_error, Project, ProjectCreateForm,
            ProjectDetailResponse, ProjectEditForm, ProjectInsert, ProjectRequest,
            MSG_TECHNOLOGIES_EXIST, MSG_TITLE_UNIQUE, MSG_TYPE_EXISTS,
        },
    },
    errors::AppError,
    repositories::{catalog::CatalogRepository, project::ProjectRepository},
    use_cases::extractors::RequestContext,
};

pub struct ProjectHandler<R, C>
where
    R: ProjectRepository,
    C: CatalogRepository,
{
    pub project_repo: R,
    pub catalog_repo: C,
}

impl<R, C> ProjectHandler<R, C>
where
    R: ProjectRepository,
    C: CatalogRepository,
{
    pub fn new(project_repo: R, catalog_repo: C) -> Self {
        ProjectHandler {
            project_repo,
            catalog_repo,
        }
    }

    /// All live projects, most recently updated first
    pub async fn list(&self, _ctx: &RequestContext) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_projects().await
    }

    /// Blank form plus the choices for its selects
    pub async fn create_form(&self, _ctx: &RequestContext) -> Result<ProjectCreateForm, AppError> {
        Ok(ProjectCreateForm {
            project: ProjectRequest::default(),
            types: self.catalog_repo.list_types().await?,
            technologies: self.catalog_repo.list_technologies().await?,
        })
    }

    /// Validates and inserts a project together with its technologies
    pub async fn store(&self, ctx: &RequestContext, request: ProjectRequest) -> Result<ActionResponse, AppError> {
        let request = request.normalized();
        self.validate_request(&request, None).await?;

        let technology_ids = request.technology_ids().unwrap_or_default();
        let insert = ProjectInsert::try_from(request)?;

        let id = self.project_repo.create_project(&insert, &technology_ids).await?;

        tracing::info!(
            actor = %ctx.subject,
            project_id = id,
            technologies = technology_ids.len(),
            "Project created"
        );

        Ok(ActionResponse::success(Some(id), project_path(id), FLASH_PROJECT_INSERTED))
    }

    /// Live project with its type and technologies
    pub async fn show(&self, _ctx: &RequestContext, id: i64) -> Result<ProjectDetailResponse, AppError> {
        let project = self.find_project(id).await?;

        let project_type = match project.type_id {
            Some(type_id) => self.catalog_repo.get_type_by_id(type_id).await?,
            None => None,
        };
        let technologies = self.project_repo.project_technologies(id).await?;

        Ok(project.to_detail_response(project_type, technologies))
    }

    pub async fn edit_form(&self, _ctx: &RequestContext, id: i64) -> Result<ProjectEditForm, AppError> {
        let project = self.find_project(id).await?;

        Ok(ProjectEditForm {
            project,
            types: self.catalog_repo.list_types().await?,
            technologies: self.catalog_repo.list_technologies().await?,
            project_technology_ids: self.project_repo.project_technology_ids(id).await?,
        })
    }

    /// Overwrites every mutable field and syncs the technology set.
    ///
    /// A missing or empty `technologies` list detaches everything; a present
    /// list becomes the exact relation.
    pub async fn update(&self, ctx: &RequestContext, id: i64, request: ProjectRequest) -> Result<ActionResponse, AppError> {
        self.find_project(id).await?;

        let request = request.normalized();
        self.validate_request(&request, Some(id)).await?;

        let technology_ids = request.technology_ids().unwrap_or_default();
        let insert = ProjectInsert::try_from(request)?;

        let plan = self.project_repo.update_project(id, &insert, &technology_ids).await?;

        tracing::info!(
            actor = %ctx.subject,
            project_id = id,
            attached = plan.to_add.len(),
            detached = plan.to_remove.len(),
            relation_changed = !plan.is_noop(),
            "Project updated"
        );

        Ok(ActionResponse::success(Some(id), project_path(id), FLASH_PROJECT_MODIFIED))
    }

    /// Soft-deletes a project
    pub async fn destroy(&self, ctx: &RequestContext, id: i64) -> Result<ActionResponse, AppError> {
        self.project_repo
            .soft_delete_project(id)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound("Project not found".to_string()),
                _ => e,
            })?;

        tracing::info!(actor = %ctx.subject, project_id = id, "Project deleted");

        Ok(ActionResponse::success(None, PROJECTS_PATH.to_string(), FLASH_PROJECT_DELETED))
    }

    /// Clears the soft-delete marker and nothing else
    pub async fn restore(&self, ctx: &RequestContext, id: i64) -> Result<ActionResponse, AppError> {
        self.project_repo.restore_project(id).await?;

        tracing::info!(actor = %ctx.subject, project_id = id, "Project restored");

        Ok(ActionResponse::success(Some(id), project_path(id), FLASH_PROJECT_RESTORED))
    }

    async fn find_project(&self, id: i64) -> Result<Project, AppError> {
        self.project_repo
            .get_project_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
    }

    /// Runs the field rules and the lookups against stored rows, reporting
    /// every violation at once.
    async fn validate_request(&self, request: &ProjectRequest, current_id: Option<i64>) -> Result<(), AppError> {
        let mut errors = request.validate().err().unwrap_or_else(ValidationErrors::new);

        if let Some(title) = request.title.as_deref() {
            if self.project_repo.project_exists_with_title(title, current_id).await? {
                errors.add("title", new_validation_error("unique", MSG_TITLE_UNIQUE));
            }
        }

        // malformed references were already reported by validate()
        if let Ok(Some(type_id)) = request.type_id() {
            if !self.catalog_repo.type_exists(type_id).await? {
                errors.add("type_id", new_validation_error("exists", MSG_TYPE_EXISTS));
            }
        }

        if let Ok(ids) = request.technology_ids() {
            if !ids.is_empty() {
                let found = self.catalog_repo.existing_technology_ids(&ids).await?;
                if ids.iter().any(|id| !found.contains(id)) {
                    errors.add("technologies", new_validation_error("exists", MSG_TECHNOLOGIES_EXIST));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(fields = errors.field_errors().len(), "Project input rejected");
            Err(errors.into())
        }
    }
}

fn project_path(id: i64) -> String {
    format!("{}/{}", PROJECTS_PATH, id)
}
