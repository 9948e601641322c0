//! Shared types, error model, and configuration for the CDP docs helper.
//!
//! This crate is the foundation depended on by all other workspace crates.
//! It provides:
//! - [`CdpDocsError`] — the unified error type
//! - Domain types ([`ProductEntry`], [`Task`], [`Answer`])
//! - Configuration ([`AppConfig`], config loading and validation)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AnswerConfig, AppConfig, FetchConfig, ServerConfig, config_dir, config_file_path,
    default_products, init_config, load_config, load_config_at, load_config_from, validate_config,
};
pub use error::{CdpDocsError, Result};
pub use types::{Answer, DEFAULT_SNIPPET_CHARS, ProductEntry, Task};
