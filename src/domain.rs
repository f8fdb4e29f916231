pub mod entities;
pub mod relation_sync;
pub mod use_cases;
