pub mod catalog;
pub mod project;
pub mod sqlx_repo;
