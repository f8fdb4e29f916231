use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxProjectRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxCatalogRepo {
    pub pool: PgPool,
}
