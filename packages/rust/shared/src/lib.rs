//! Shared types, error model, and configuration for Postforge.
//!
//! This crate is the foundation depended on by all other Postforge crates.
//! It provides:
//! - [`PostforgeError`], the unified error type
//! - Domain types ([`Sector`], [`Sentiment`], [`RawContent`], [`ContentRecord`])
//! - Configuration ([`AppConfig`], config loading) and tracing setup

pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ClassificationConfig, ClassificationStrategy, CleanerConfig, LogFormat,
    LoggingConfig, config_dir, config_file_path, init_config, init_config_in, load_config,
    load_config_from,
};
pub use error::{PostforgeError, Result};
pub use telemetry::init_tracing;
pub use types::{CleanerReport, ContentRecord, RawContent, Sector, Sentiment};
