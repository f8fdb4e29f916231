use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const PROJECTS_PATH: &str = "/admin/projects";

pub const FLASH_PROJECT_INSERTED: &str = "Project successfully inserted";
pub const FLASH_PROJECT_MODIFIED: &str = "Project successfully modified";
pub const FLASH_PROJECT_DELETED: &str = "Project successfully deleted";
pub const FLASH_PROJECT_RESTORED: &str = "Project successfully restored";
