use crate::{entities::catalog::Technology, errors::AppError, repositories::catalog::CatalogRepository};

pub const TECHNOLOGY_NAMES: [&str; 15] = [
    "React",
    "Angular",
    "Vue.js",
    "Node.js",
    "Laravel",
    "Ruby on Rails",
    "ASP.NET",
    "Express.js",
    "Django",
    "Flask",
    "Spring Boot",
    "Swift",
    "Kotlin",
    "C#",
    "Java",
];

/// Inserts every name in [`TECHNOLOGY_NAMES`] as its own row.
///
/// There is no existence check: running it twice inserts the list twice.
pub async fn seed_technologies<C: CatalogRepository + ?Sized>(repo: &C) -> Result<Vec<Technology>, AppError> {
    let mut inserted = Vec::with_capacity(TECHNOLOGY_NAMES.len());

    for name in TECHNOLOGY_NAMES {
        inserted.push(repo.create_technology(name).await?);
    }

    tracing::info!("Seeded {} technologies", inserted.len());
    Ok(inserted)
}
