use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::project::{scalar_text, MAX_SHORT_TEXT_LENGTH};

/// Single-valued category a project may belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectType {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Technology {
    pub id: i64,
    pub name: String,
}

/// The two reference tables editable from the admin area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Type,
    Technology,
}

impl CatalogKind {
    pub fn label(self) -> &'static str {
        match self {
            CatalogKind::Type => "Type",
            CatalogKind::Technology => "Technology",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            CatalogKind::Type => "/admin/types",
            CatalogKind::Technology => "/admin/technologies",
        }
    }

    pub fn not_found(self) -> String {
        format!("{} not found", self.label())
    }
}

/// Store and update payload for a type or a technology.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CatalogItemRequest {
    #[serde(deserialize_with = "scalar_text")]
    #[validate(
        required(message = "The name field is mandatory."),
        length(max = MAX_SHORT_TEXT_LENGTH, message = "The name field cannot exceed 255 characters.")
    )]
    pub name: Option<String>,
}

impl CatalogItemRequest {
    pub fn normalized(self) -> Self {
        CatalogItemRequest {
            name: self
                .name
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_name_is_mandatory() {
        let request: CatalogItemRequest = serde_json::from_value(json!({ "name": "   " })).unwrap();
        let errors = request.normalized().validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn paths_and_labels() {
        assert_eq!(CatalogKind::Type.path(), "/admin/types");
        assert_eq!(CatalogKind::Technology.not_found(), "Technology not found");
    }
}
