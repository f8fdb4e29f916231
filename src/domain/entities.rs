pub mod catalog;
pub mod flash;
pub mod project;
pub mod token;
