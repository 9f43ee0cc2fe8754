pub mod config;
pub mod domain;
pub mod ingest;
pub mod llm;
pub mod report;
pub mod stats;
pub mod time;
