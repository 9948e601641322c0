//! Application configuration for the CDP docs helper.
//!
//! User config lives at `~/.cdpdocs/cdpdocs.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CdpDocsError, Result};
use crate::types::{DEFAULT_SNIPPET_CHARS, ProductEntry};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "cdpdocs.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".cdpdocs";

/// Built-in product table, in matching order.
const DEFAULT_PRODUCTS: [(&str, &str); 4] = [
    ("segment", "https://segment.com/docs/?ref=nav"),
    ("mparticle", "https://docs.mparticle.com/"),
    ("lytics", "https://docs.lytics.com/"),
    ("zeotap", "https://docs.zeotap.com/home/en-us/"),
];

// ---------------------------------------------------------------------------
// Config structs (matching cdpdocs.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Web front-end settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Outbound HTTP settings.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Snippet extraction settings.
    #[serde(default)]
    pub answer: AnswerConfig,

    /// Product keyword → documentation URL table, in matching order.
    #[serde(default = "default_products")]
    pub products: Vec<ProductEntry>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            fetch: FetchConfig::default(),
            answer: AnswerConfig::default(),
            products: default_products(),
        }
    }
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the web front-end binds to.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:5000".into()
}

/// `[fetch]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds. `0` waits indefinitely.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// `[answer]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerConfig {
    /// Number of characters returned from the match onwards.
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            snippet_chars: default_snippet_chars(),
        }
    }
}

fn default_snippet_chars() -> usize {
    DEFAULT_SNIPPET_CHARS
}

/// The built-in product table.
pub fn default_products() -> Vec<ProductEntry> {
    DEFAULT_PRODUCTS
        .iter()
        .map(|(keyword, url)| {
            ProductEntry::new(*keyword, Url::parse(url).expect("built-in product URL"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Reject configs the assistant cannot serve from.
pub fn validate_config(config: &AppConfig) -> Result<()> {
    if config.products.is_empty() {
        return Err(CdpDocsError::validation("at least one product is required"));
    }

    for entry in &config.products {
        if entry.keyword.trim().is_empty() {
            return Err(CdpDocsError::validation(format!(
                "product keyword for {} must not be empty",
                entry.url
            )));
        }
        match entry.url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(CdpDocsError::validation(format!(
                    "product '{}' uses unsupported scheme '{scheme}'",
                    entry.keyword
                )));
            }
        }
    }

    if config.answer.snippet_chars == 0 {
        return Err(CdpDocsError::validation(
            "answer.snippet_chars must be greater than zero",
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.cdpdocs/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| CdpDocsError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.cdpdocs/cdpdocs.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    load_config_at(&config_file_path()?)
}

/// Load the config at `path`, falling back to defaults if the file does not exist.
pub fn load_config_at(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(path)
}

/// Load and validate the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| CdpDocsError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        CdpDocsError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    validate_config(&config)?;
    tracing::debug!(?path, products = config.products.len(), "loaded config");
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| CdpDocsError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| CdpDocsError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| CdpDocsError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
