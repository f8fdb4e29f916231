use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::entities::catalog::{ProjectType, Technology};

// ───── Constants ──────────────────────────────────────────────────────
pub const MAX_TITLE_LENGTH: u64 = 50;
pub const MAX_SHORT_TEXT_LENGTH: u64 = 255;

pub const MSG_TITLE_UNIQUE: &str = "The title field must be unique.";
pub const MSG_TYPE_EXISTS: &str = "the indicated type does not exist";
pub const MSG_TECHNOLOGIES_EXIST: &str = "one or more selected technologies are invalid";

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub cover_image: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub category: String,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub client: Option<String>,
    pub role: String,
    pub additional_notes: Option<String>,
    pub visibility: bool,
    pub type_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Validated column values written on store and update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectInsert {
    pub title: String,
    pub description: String,
    pub cover_image: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub category: String,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub client: Option<String>,
    pub role: String,
    pub additional_notes: Option<String>,
    pub visibility: bool,
    pub type_id: Option<i64>,
}

// ───── Input & Validation Requests ──────────────────────────────────

/// Raw form payload for store and update.
///
/// Every field is optional at the type level and no field can fail
/// deserialization, so a wrong value surfaces as a validation message next to
/// every other violation of the same request. Text fields take any scalar.
/// `visibility`, `type_id` and `technologies` stay raw JSON values because
/// form clients send `"1"` and `"3"` as often as `true` and `3`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ProjectRequest {
    #[serde(deserialize_with = "scalar_text")]
    #[validate(
        required(message = "The title field is mandatory."),
        length(max = MAX_TITLE_LENGTH, message = "The title field cannot exceed 50 characters.")
    )]
    pub title: Option<String>,

    #[serde(deserialize_with = "scalar_text")]
    #[validate(required(message = "The description field is mandatory."))]
    pub description: Option<String>,

    #[serde(deserialize_with = "scalar_text")]
    #[validate(custom(function = "validate_cover_image"))]
    pub cover_image: Option<String>,

    #[serde(deserialize_with = "scalar_text")]
    #[validate(
        required(message = "The start date field is mandatory."),
        custom(function = "validate_start_date")
    )]
    pub start_date: Option<String>,

    #[serde(deserialize_with = "scalar_text")]
    #[validate(custom(function = "validate_end_date"))]
    pub end_date: Option<String>,

    #[serde(deserialize_with = "scalar_text")]
    #[validate(
        required(message = "The category field is mandatory."),
        length(max = MAX_SHORT_TEXT_LENGTH, message = "The category field cannot exceed 255 characters.")
    )]
    pub category: Option<String>,

    #[serde(deserialize_with = "scalar_text")]
    #[validate(custom(function = "validate_project_url"))]
    pub project_url: Option<String>,

    #[serde(deserialize_with = "scalar_text")]
    #[validate(custom(function = "validate_github_url"))]
    pub github_url: Option<String>,

    #[serde(deserialize_with = "scalar_text")]
    #[validate(length(max = MAX_SHORT_TEXT_LENGTH, message = "The client field cannot exceed 255 characters."))]
    pub client: Option<String>,

    #[serde(deserialize_with = "scalar_text")]
    #[validate(
        required(message = "The role field is mandatory."),
        length(max = MAX_SHORT_TEXT_LENGTH, message = "The role field cannot exceed 255 characters.")
    )]
    pub role: Option<String>,

    #[serde(deserialize_with = "scalar_text")]
    pub additional_notes: Option<String>,

    #[validate(
        required(message = "The visibility field is mandatory."),
        custom(function = "validate_visibility")
    )]
    pub visibility: Option<Value>,

    #[validate(custom(function = "validate_type_reference"))]
    pub type_id: Option<Value>,

    #[validate(custom(function = "validate_technology_references"))]
    pub technologies: Option<Value>,
}

impl ProjectRequest {
    /// Trims every string field and drops the ones left empty, the way a
    /// submitted HTML form is read.
    pub fn normalized(self) -> Self {
        ProjectRequest {
            title: blank_to_none(self.title),
            description: blank_to_none(self.description),
            cover_image: blank_to_none(self.cover_image),
            start_date: blank_to_none(self.start_date),
            end_date: blank_to_none(self.end_date),
            category: blank_to_none(self.category),
            project_url: blank_to_none(self.project_url),
            github_url: blank_to_none(self.github_url),
            client: blank_to_none(self.client),
            role: blank_to_none(self.role),
            additional_notes: blank_to_none(self.additional_notes),
            visibility: blank_value_to_none(self.visibility),
            type_id: blank_value_to_none(self.type_id),
            technologies: blank_value_to_none(self.technologies),
        }
    }

    /// The referenced type id, `Ok(None)` when no type was chosen.
    pub fn type_id(&self) -> Result<Option<i64>, ValidationError> {
        match &self.type_id {
            None => Ok(None),
            Some(value) => parse_id(value)
                .map(Some)
                .ok_or_else(|| new_validation_error("exists", MSG_TYPE_EXISTS)),
        }
    }

    /// Requested technology ids with duplicates removed, first occurrence wins.
    /// A missing list is an empty one.
    pub fn technology_ids(&self) -> Result<Vec<i64>, ValidationError> {
        let invalid = || new_validation_error("exists", MSG_TECHNOLOGIES_EXIST);

        let items = match &self.technologies {
            None => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(_) => return Err(invalid()),
        };

        let mut seen = std::collections::HashSet::new();
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            let id = parse_id(item).ok_or_else(invalid)?;
            if seen.insert(id) {
                ids.push(id);
            }
        }
        Ok(ids)
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn blank_value_to_none(value: Option<Value>) -> Option<Value> {
    match value {
        Some(Value::Null) => None,
        Some(Value::String(s)) => blank_to_none(Some(s)).map(Value::String),
        other => other,
    }
}

/// Numbers and booleans arrive as their text; arrays, objects and `null`
/// count as absent.
pub fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    #[serde(flatten)]
    pub project: Project,
    #[serde(rename = "type")]
    pub project_type: Option<ProjectType>,
    pub technologies: Vec<Technology>,
}

#[derive(Debug, Serialize)]
pub struct ProjectCreateForm {
    pub project: ProjectRequest,
    pub types: Vec<ProjectType>,
    pub technologies: Vec<Technology>,
}

#[derive(Debug, Serialize)]
pub struct ProjectEditForm {
    pub project: Project,
    pub types: Vec<ProjectType>,
    pub technologies: Vec<Technology>,
    pub project_technology_ids: Vec<i64>,
}

// ───── Validation Helpers ───────────────────────────────────────────

pub fn validate_cover_image(url: &str) -> Result<(), ValidationError> {
    validate_url(url, "The cover image must be a valid URL.")
}

pub fn validate_project_url(url: &str) -> Result<(), ValidationError> {
    validate_url(url, "The project URL must be a valid URL.")
}

pub fn validate_github_url(url: &str) -> Result<(), ValidationError> {
    validate_url(url, "The GitHub URL must be a valid URL.")
}

pub fn validate_start_date(value: &str) -> Result<(), ValidationError> {
    parse_date(value)
        .map(|_| ())
        .ok_or_else(|| new_validation_error("date", "The start date must be a valid date."))
}

pub fn validate_end_date(value: &str) -> Result<(), ValidationError> {
    parse_date(value)
        .map(|_| ())
        .ok_or_else(|| new_validation_error("date", "The end date must be a valid date."))
}

pub fn validate_visibility(value: &Value) -> Result<(), ValidationError> {
    parse_boolean(value)
        .map(|_| ())
        .ok_or_else(|| new_validation_error("boolean", "The visibility field must be true or false."))
}

fn validate_type_reference(value: &Value) -> Result<(), ValidationError> {
    parse_id(value)
        .map(|_| ())
        .ok_or_else(|| new_validation_error("exists", MSG_TYPE_EXISTS))
}

fn validate_technology_references(value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::Array(items) if items.iter().all(|item| parse_id(item).is_some()) => Ok(()),
        _ => Err(new_validation_error("exists", MSG_TECHNOLOGIES_EXIST)),
    }
}

fn validate_url(url: &str, message: &'static str) -> Result<(), ValidationError> {
    match url::Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some() => Ok(()),
        _ => Err(new_validation_error("url", message)),
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, keeping only its date.
///
/// Free-form inputs such as `2024/01/01` or `next monday` are rejected on
/// purpose: a stored date must come from an unambiguous calendar value.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Accepts `true`, `false`, `1`, `0`, `"1"` and `"0"`.
pub fn parse_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.as_str() {
            "1" => Some(true),
            "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Accepts a positive integer or its decimal text, as `<select>` values arrive.
pub fn parse_id(value: &Value) -> Option<i64> {
    let id = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    (id > 0).then_some(id)
}

pub fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

// ───── Conversions ──────────────────────────────────────────────────

impl TryFrom<ProjectRequest> for ProjectInsert {
    type Error = ValidationErrors;

    fn try_from(value: ProjectRequest) -> Result<Self, Self::Error> {
        value.validate()?;

        let start_date = value.start_date.as_deref().and_then(parse_date);
        let end_date = value.end_date.as_deref().and_then(parse_date);
        let visibility = value.visibility.as_ref().and_then(parse_boolean);
        let type_id = value.type_id().map_err(|e| {
            let mut errors = ValidationErrors::new();
            errors.add("type_id", e);
            errors
        })?;

        match (value.title, value.description, start_date, value.category, value.role, visibility) {
            (Some(title), Some(description), Some(start_date), Some(category), Some(role), Some(visibility)) => {
                Ok(ProjectInsert {
                    title,
                    description,
                    cover_image: value.cover_image,
                    start_date,
                    end_date,
                    category,
                    project_url: value.project_url,
                    github_url: value.github_url,
                    client: value.client,
                    role,
                    additional_notes: value.additional_notes,
                    visibility,
                    type_id,
                })
            }
            // validate() already rejected every missing required field
            _ => {
                let mut errors = ValidationErrors::new();
                errors.add("project", new_validation_error("incomplete", "Invalid value"));
                Err(errors)
            }
        }
    }
}

impl Project {
    pub fn to_detail_response(&self, project_type: Option<ProjectType>, technologies: Vec<Technology>) -> ProjectDetailResponse {
        ProjectDetailResponse {
            project: self.clone(),
            project_type,
            technologies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalized_drops_blank_strings() {
        let request = ProjectRequest {
            title: Some("  Portfolio Site  ".into()),
            client: Some("   ".into()),
            visibility: Some(json!("")),
            ..Default::default()
        }
        .normalized();

        assert_eq!(request.title.as_deref(), Some("Portfolio Site"));
        assert_eq!(request.client, None);
        assert_eq!(request.visibility, None);
    }

    #[test]
    fn parse_boolean_accepts_form_values_only() {
        assert_eq!(parse_boolean(&json!(true)), Some(true));
        assert_eq!(parse_boolean(&json!(0)), Some(false));
        assert_eq!(parse_boolean(&json!("1")), Some(true));
        assert_eq!(parse_boolean(&json!("yes")), None);
        assert_eq!(parse_boolean(&json!(2)), None);
    }

    #[test]
    fn parse_date_keeps_date_part_of_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert_eq!(parse_date("2024-01-01"), expected);
        assert_eq!(parse_date("2024-01-01T10:30:00Z"), expected);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024/01/01"), None);
    }

    #[test]
    fn technology_ids_are_deduplicated() {
        let request = ProjectRequest {
            technologies: Some(json!([3, "1", 3, 2, "1"])),
            ..Default::default()
        };
        assert_eq!(request.technology_ids().ok(), Some(vec![3, 1, 2]));
    }

    #[test]
    fn malformed_references_are_validation_errors() {
        let request = ProjectRequest {
            type_id: Some(json!("abc")),
            technologies: Some(json!(["x"])),
            ..Default::default()
        };
        assert!(request.type_id().is_err());
        assert!(request.technology_ids().is_err());

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("type_id"));
        assert!(fields.contains_key("technologies"));
    }

    #[test]
    fn blank_references_count_as_absent() {
        let request = ProjectRequest {
            type_id: Some(json!("")),
            technologies: Some(Value::Null),
            ..Default::default()
        }
        .normalized();

        assert_eq!(request.type_id().ok(), Some(None));
        assert_eq!(request.technology_ids().ok(), Some(vec![]));
    }

    #[test]
    fn text_fields_accept_any_scalar() {
        let request: ProjectRequest = serde_json::from_value(json!({
            "title": 2024,
            "client": ["nested"],
            "role": true
        }))
        .unwrap();

        assert_eq!(request.title.as_deref(), Some("2024"));
        assert_eq!(request.client, None);
        assert_eq!(request.role.as_deref(), Some("true"));
    }

    #[test]
    fn parse_id_accepts_numeric_text() {
        assert_eq!(parse_id(&json!(3)), Some(3));
        assert_eq!(parse_id(&json!(" 7 ")), Some(7));
        assert_eq!(parse_id(&json!("x")), None);
        assert_eq!(parse_id(&json!(0)), None);
        assert_eq!(parse_id(&json!(1.5)), None);
    }
}
