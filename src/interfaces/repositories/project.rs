use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use crate::{
    domain::relation_sync::SyncPlan,
    entities::{
        catalog::Technology,
        project::{Project, ProjectInsert, MSG_TITLE_UNIQUE},
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

/// Column list for `projects` queries.
const PROJECT_COLUMNS: &str = "\
    id, title, description, cover_image, start_date, end_date, category, \
    project_url, github_url, client, role, additional_notes, visibility, \
    type_id, created_at, updated_at, deleted_at";

/// Partial unique index on `projects(title) WHERE deleted_at IS NULL`.
const TITLE_ACTIVE_INDEX: &str = "projects_title_active_key";

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;

    /// Non-deleted projects, most recently updated first.
    async fn list_projects(&self) -> Result<Vec<Project>, AppError>;

    /// `None` when the row is missing or soft-deleted.
    async fn get_project_by_id(&self, id: i64) -> Result<Option<Project>, AppError>;

    async fn project_exists_with_title(&self, title: &str, exclude_id: Option<i64>) -> Result<bool, AppError>;

    /// Inserts the row and attaches `technology_ids` atomically.
    async fn create_project(&self, project: &ProjectInsert, technology_ids: &[i64]) -> Result<i64, AppError>;

    /// Overwrites the row and syncs the relation to exactly `technology_ids`
    /// atomically, returning the join-table changes that were applied.
    async fn update_project(&self, id: i64, project: &ProjectInsert, technology_ids: &[i64]) -> Result<SyncPlan, AppError>;

    async fn project_technology_ids(&self, id: i64) -> Result<Vec<i64>, AppError>;
    async fn project_technologies(&self, id: i64) -> Result<Vec<Technology>, AppError>;
    async fn soft_delete_project(&self, id: i64) -> Result<(), AppError>;
    async fn restore_project(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
impl<T: ProjectRepository + ?Sized> ProjectRepository for Arc<T> {
    async fn check_connection(&self) -> Result<(), AppError> {
        (**self).check_connection().await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        (**self).list_projects().await
    }

    async fn get_project_by_id(&self, id: i64) -> Result<Option<Project>, AppError> {
        (**self).get_project_by_id(id).await
    }

    async fn project_exists_with_title(&self, title: &str, exclude_id: Option<i64>) -> Result<bool, AppError> {
        (**self).project_exists_with_title(title, exclude_id).await
    }

    async fn create_project(&self, project: &ProjectInsert, technology_ids: &[i64]) -> Result<i64, AppError> {
        (**self).create_project(project, technology_ids).await
    }

    async fn update_project(&self, id: i64, project: &ProjectInsert, technology_ids: &[i64]) -> Result<SyncPlan, AppError> {
        (**self).update_project(id, project, technology_ids).await
    }

    async fn project_technology_ids(&self, id: i64) -> Result<Vec<i64>, AppError> {
        (**self).project_technology_ids(id).await
    }

    async fn project_technologies(&self, id: i64) -> Result<Vec<Technology>, AppError> {
        (**self).project_technologies(id).await
    }

    async fn soft_delete_project(&self, id: i64) -> Result<(), AppError> {
        (**self).soft_delete_project(id).await
    }

    async fn restore_project(&self, id: i64) -> Result<(), AppError> {
        (**self).restore_project(id).await
    }
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let query = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects \
             WHERE deleted_at IS NULL \
             ORDER BY updated_at DESC, id DESC"
        );
        let projects = sqlx::query_as::<_, Project>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    async fn get_project_by_id(&self, id: i64) -> Result<Option<Project>, AppError> {
        let query = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1 AND deleted_at IS NULL"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(project)
    }

    async fn project_exists_with_title(&self, title: &str, exclude_id: Option<i64>) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM projects
                WHERE title = $1
                  AND deleted_at IS NULL
                  AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#
        )
        .bind(title)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create_project(&self, project: &ProjectInsert, technology_ids: &[i64]) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO projects (
                title, description, cover_image, start_date, end_date, category,
                project_url, github_url, client, role, additional_notes, visibility,
                type_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, NOW(), NOW())
            RETURNING id
            "#
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.cover_image)
        .bind(project.start_date)
        .bind(project.end_date)
        .bind(&project.category)
        .bind(&project.project_url)
        .bind(&project.github_url)
        .bind(&project.client)
        .bind(&project.role)
        .bind(&project.additional_notes)
        .bind(project.visibility)
        .bind(project.type_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(title_conflict)?;

        attach_technologies(&mut tx, id, technology_ids).await?;

        tx.commit().await?;
        Ok(id)
    }

    async fn update_project(&self, id: i64, project: &ProjectInsert, technology_ids: &[i64]) -> Result<SyncPlan, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE projects SET
                title = $1,
                description = $2,
                cover_image = $3,
                start_date = $4,
                end_date = $5,
                category = $6,
                project_url = $7,
                github_url = $8,
                client = $9,
                role = $10,
                additional_notes = $11,
                visibility = $12,
                type_id = $13,
                updated_at = NOW()
            WHERE id = $14 AND deleted_at IS NULL
            RETURNING id
            "#
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.cover_image)
        .bind(project.start_date)
        .bind(project.end_date)
        .bind(&project.category)
        .bind(&project.project_url)
        .bind(&project.github_url)
        .bind(&project.client)
        .bind(&project.role)
        .bind(&project.additional_notes)
        .bind(project.visibility)
        .bind(project.type_id)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(title_conflict)?;

        if updated.is_none() {
            return Err(AppError::NotFound("Project not found".into()));
        }

        let current: Vec<i64> = sqlx::query_scalar(
            "SELECT technology_id FROM project_technology WHERE project_id = $1 FOR UPDATE"
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        let plan = SyncPlan::between(&current, technology_ids);

        if !plan.to_remove.is_empty() {
            sqlx::query(
                "DELETE FROM project_technology WHERE project_id = $1 AND technology_id = ANY($2)"
            )
            .bind(id)
            .bind(plan.to_remove.as_slice())
            .execute(&mut *tx)
            .await?;
        }

        attach_technologies(&mut tx, id, &plan.to_add).await?;

        tx.commit().await?;
        Ok(plan)
    }

    async fn project_technology_ids(&self, id: i64) -> Result<Vec<i64>, AppError> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT technology_id FROM project_technology WHERE project_id = $1 ORDER BY technology_id"
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn project_technologies(&self, id: i64) -> Result<Vec<Technology>, AppError> {
        let technologies = sqlx::query_as::<_, Technology>(
            r#"
            SELECT t.id, t.name
            FROM technologies t
            JOIN project_technology pt ON pt.technology_id = t.id
            WHERE pt.project_id = $1
            ORDER BY t.id
            "#
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(technologies)
    }

    async fn soft_delete_project(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".into()));
        }

        Ok(())
    }

    async fn restore_project(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET deleted_at = NULL
            WHERE id = $1 AND deleted_at IS NOT NULL
            "#
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(TITLE_ACTIVE_INDEX) {
                    return AppError::Conflict("An active project already uses this title".into());
                }
            }
            AppError::from(e)
        })?;

        if result.rows_affected() == 0 {
            let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

            return if exists {
                Err(AppError::Conflict("Project is not deleted".into()))
            } else {
                Err(AppError::NotFound("Project not found".into()))
            };
        }

        Ok(())
    }
}

async fn attach_technologies(conn: &mut PgConnection, project_id: i64, technology_ids: &[i64]) -> Result<(), AppError> {
    if technology_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO project_technology (project_id, technology_id)
        SELECT $1, UNNEST($2::BIGINT[])
        ON CONFLICT DO NOTHING
        "#
    )
    .bind(project_id)
    .bind(technology_ids)
    .execute(conn)
    .await?;

    Ok(())
}

fn title_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some(TITLE_ACTIVE_INDEX) {
            return AppError::Conflict(MSG_TITLE_UNIQUE.into());
        }
    }
    AppError::from(e)
}
