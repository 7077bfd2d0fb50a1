//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use lustre_cache::Cache;
use lustre_data::{FetchClient, TimeoutConfig};
use lustre_storefront::{CdnImageResolver, HttpProductSource};

use crate::config::{LustreConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: LustreConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from an explicit config file, or the nearest one found
    /// from the working directory up. No file means defaults.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = match config_path {
            Some(path) => LustreConfig::load(Path::new(path))?,
            None => match find_config_file(&cwd) {
                Some(path) => {
                    tracing::debug!(path = %path.display(), "using config file");
                    LustreConfig::load(&path)?
                }
                None => LustreConfig::default(),
            },
        };

        Ok(Self {
            config,
            output,
            cwd,
        })
    }

    /// HTTP client for the configured product API.
    pub fn client(&self) -> Result<FetchClient> {
        let timeout = TimeoutConfig::from_total(Duration::from_millis(self.config.api.timeout_ms));
        let client = FetchClient::with_timeout(timeout)
            .context("Failed to build HTTP client")?
            .with_base_url(&self.config.api.base_url)
            .with_default_header("Accept", "application/json");
        Ok(client)
    }

    pub fn source(&self) -> Result<Arc<HttpProductSource>> {
        Ok(Arc::new(HttpProductSource::new(self.client()?)))
    }

    pub fn images(&self) -> CdnImageResolver {
        CdnImageResolver::new(&self.config.images.base_url, &self.config.images.placeholder)
    }

    /// Directory holding the saved cart and wishlist.
    pub fn storage_dir(&self) -> PathBuf {
        match &self.config.storage.dir {
            Some(dir) => self.resolve_path(dir),
            None => data_dir().join("lustre"),
        }
    }

    /// File-backed cache for saved state.
    pub fn cache(&self) -> Result<Cache> {
        let dir = self.storage_dir();
        Cache::open(&dir)
            .with_context(|| format!("Failed to open storage directory: {}", dir.display()))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Nearest config file from `start` up to the filesystem root.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

/// Get the platform-specific data directory.
fn data_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        std::env::temp_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(find_config_file(&nested), None);

        std::fs::write(root.path().join("lustre.toml"), "").unwrap();
        assert_eq!(
            find_config_file(&nested),
            Some(root.path().join("lustre.toml"))
        );

        std::fs::write(nested.join("lustre.json"), "{}").unwrap();
        assert_eq!(find_config_file(&nested), Some(nested.join("lustre.json")));
    }

    #[test]
    fn test_storage_dir_resolves_relative() {
        let mut config = LustreConfig::default();
        config.storage.dir = Some("state".to_string());
        let ctx = Context {
            config,
            output: Output::new(false, true),
            cwd: PathBuf::from("/work/shop"),
        };
        assert_eq!(ctx.storage_dir(), PathBuf::from("/work/shop/state"));
        assert_eq!(ctx.resolve_path("/abs"), PathBuf::from("/abs"));
    }
}
