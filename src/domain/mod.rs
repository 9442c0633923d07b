pub mod error;
pub mod llm_config;
pub mod summary;

// Tabular import module
pub mod import;
