//! Application configuration for seoforge.
//!
//! User config lives at `~/.seoforge/seoforge.toml`.
//! Caller-supplied values override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeoForgeError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "seoforge.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".seoforge";

// ---------------------------------------------------------------------------
// Config structs (matching seoforge.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Keyword qualification defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Cross-linking settings.
    #[serde(default)]
    pub linking: LinkingConfig,

    /// Target site settings.
    #[serde(default)]
    pub site: SiteConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default output directory for generated articles.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Minimum search volume for a keyword to qualify.
    #[serde(default = "default_min_volume")]
    pub min_volume: u32,

    /// Maximum keyword difficulty for a keyword to qualify.
    #[serde(default = "default_max_difficulty")]
    pub max_difficulty: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            min_volume: default_min_volume(),
            max_difficulty: default_max_difficulty(),
        }
    }
}

fn default_output_dir() -> String {
    "./data/generated/articles".into()
}
fn default_min_volume() -> u32 {
    1000
}
fn default_max_difficulty() -> f64 {
    30.0
}

/// `[linking]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkingConfig {
    /// Target internal links per 1000 words of article body.
    #[serde(default = "default_links_per_1k_words")]
    pub links_per_1k_words: f64,

    /// Minimum token-set similarity (0-100) for a post to be a link candidate.
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f64,
}

impl Default for LinkingConfig {
    fn default() -> Self {
        Self {
            links_per_1k_words: default_links_per_1k_words(),
            min_similarity: default_min_similarity(),
        }
    }
}

fn default_links_per_1k_words() -> f64 {
    3.5
}
fn default_min_similarity() -> f64 {
    60.0
}

/// `[site]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the target blog, used to classify links as internal.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default article author.
    #[serde(default = "default_author")]
    pub author: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            author: default_author(),
        }
    }
}

fn default_base_url() -> String {
    "https://example.com/blog".into()
}
fn default_author() -> String {
    "Editorial Team".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.seoforge/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| SeoForgeError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.seoforge/seoforge.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SeoForgeError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        SeoForgeError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| SeoForgeError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| SeoForgeError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| SeoForgeError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
