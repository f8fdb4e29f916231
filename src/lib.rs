use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod seeder;
pub mod telemetry;

pub use domain::{entities, relation_sync, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, db, utils};

use auth::jwt::JwtService;
use repositories::{
    catalog::CatalogRepository,
    project::ProjectRepository,
    sqlx_repo::{SqlxCatalogRepo, SqlxProjectRepo},
};
use use_cases::{catalog::CatalogHandler, project::ProjectHandler};

pub struct AppState {
    pub project_handler: AppProjectHandler,
    pub catalog_handler: AppCatalogHandler,
    pub token_service: JwtService,
}

pub type AppProjectHandler = ProjectHandler<Arc<dyn ProjectRepository>, Arc<dyn CatalogRepository>>;
pub type AppCatalogHandler = CatalogHandler<Arc<dyn CatalogRepository>>;

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let project_repo = Arc::new(SqlxProjectRepo::new(pool.clone()));
        let catalog_repo = Arc::new(SqlxCatalogRepo::new(pool));

        AppState::with_repositories(config, project_repo, catalog_repo)
    }

    /// Wires the state around any repository implementations.
    pub fn with_repositories(
        config: &settings::AppConfig,
        project_repo: Arc<dyn ProjectRepository>,
        catalog_repo: Arc<dyn CatalogRepository>,
    ) -> Self {
        AppState {
            project_handler: ProjectHandler::new(project_repo, catalog_repo.clone()),
            catalog_handler: CatalogHandler::new(catalog_repo),
            token_service: JwtService::new(config),
        }
    }
}
