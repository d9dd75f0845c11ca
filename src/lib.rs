pub mod analyzer;
pub mod loader;
pub mod models;
pub mod report;
