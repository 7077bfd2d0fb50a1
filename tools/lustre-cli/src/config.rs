//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order, from the working directory up.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["lustre.toml", ".lustre.toml", "lustre.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LustreConfig {
    /// Product API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Image resolution settings.
    #[serde(default)]
    pub images: ImageConfig,

    /// Search page settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Where the cart and wishlist are saved.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl LustreConfig {
    /// Load config from a file. `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }
}

/// Product API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the `/products` endpoints hang off.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Records requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_page_size() -> u32 {
    20
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            page_size: default_page_size(),
        }
    }
}

/// Image configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    /// CDN base for relative image identifiers. Empty leaves them as-is.
    #[serde(default)]
    pub base_url: String,

    /// Shown when a product has no image.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

fn default_placeholder() -> String {
    "/images/placeholder.png".to_string()
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            placeholder: default_placeholder(),
        }
    }
}

/// Search configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Offered when the query is empty or matches nothing.
    #[serde(default = "default_suggestions")]
    pub suggestions: Vec<String>,
}

fn default_suggestions() -> Vec<String> {
    ["Lipstick", "Foundation", "Serum", "Moisturizer", "Perfume", "Shampoo"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            suggestions: default_suggestions(),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for saved state. Relative paths resolve against the
    /// working directory; unset uses the user data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

/// Generate a default lustre.toml config file.
pub fn generate_default_config(base_url: &str) -> String {
    format!(
        r#"# Lustre storefront CLI configuration

[api]
base_url = "{base_url}"
timeout_ms = 10000
page_size = 20

[images]
# base_url = "https://cdn.example.com/images"
placeholder = "/images/placeholder.png"

[search]
suggestions = ["Lipstick", "Foundation", "Serum", "Moisturizer", "Perfume", "Shampoo"]

[storage]
# dir = ".lustre"
"#,
        base_url = base_url
    )
}
