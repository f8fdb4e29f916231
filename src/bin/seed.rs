use anyhow::Context;
use portfolio_admin::{
    db::postgres::{create_pool, run_migrations},
    repositories::sqlx_repo::SqlxCatalogRepo,
    seeder::seed_technologies,
    settings::AppConfig,
    telemetry::init_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::new().context("Configuration error")?;

    let pool = create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to create database connection pool")?;

    run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    let catalog_repo = SqlxCatalogRepo::new(pool);
    let technologies = seed_technologies(&catalog_repo)
        .await
        .map_err(|e| anyhow::anyhow!("Seeding failed: {}", e))?;

    tracing::info!("🌱 Inserted {} technology rows", technologies.len());
    Ok(())
}
