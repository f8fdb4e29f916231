use crate::errors::AppError;

/// Parses a route id segment. Anything that is not a positive integer cannot
/// name a row, so it resolves to 404 like a missing one.
pub fn valid_id(id: &str, resource: &str) -> Result<i64, AppError> {
    id.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::NotFound(format!("{resource} not found")))
}
