pub mod config;
pub mod domain;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod metadata;
pub mod pipeline;
pub mod report;
