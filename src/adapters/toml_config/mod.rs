// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::SplicerConfig;
use crate::error::{SplicerError, SplicerResult};

/// Locations searched when no config file is given explicitly
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["splicer.toml", "config/splicer.toml"];

/// TOML configuration adapter
#[derive(Debug, Clone)]
pub struct TomlConfigAdapter {
    search_paths: Vec<PathBuf>,
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::with_search_paths(DEFAULT_CONFIG_PATHS.iter().map(PathBuf::from))
    }
}

impl TomlConfigAdapter {
    pub fn with_search_paths<I: IntoIterator<Item = PathBuf>>(paths: I) -> Self {
        Self {
            search_paths: paths.into_iter().collect(),
        }
    }

    /// Parse configuration from TOML text; missing sections keep their defaults
    pub fn load_str(&self, content: &str) -> SplicerResult<SplicerConfig> {
        toml::from_str(content).map_err(|e| SplicerError::ConfigError {
            message: format!("Failed to parse TOML config: {}", e),
        })
    }

    /// Load a specific file. A missing file is an error.
    pub fn load_file(&self, path: &Path) -> SplicerResult<SplicerConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| SplicerError::ConfigError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        info!("Loading configuration from: {}", path.display());
        self.load_str(&content)
    }

    /// Load `explicit` if given, otherwise the first search path that exists,
    /// otherwise the defaults
    pub fn load(&self, explicit: Option<&Path>) -> SplicerResult<SplicerConfig> {
        if let Some(path) = explicit {
            return self.load_file(path);
        }
        match self.search_paths.iter().find(|path| path.is_file()) {
            Some(path) => self.load_file(path),
            None => {
                info!("No config file found, using defaults");
                Ok(SplicerConfig::default())
            }
        }
    }
}
