pub mod config;
pub mod import;
pub mod llm_clients;
pub mod response;
pub mod storage;
