use notemark_engine::{MarkdownParser, ParseCache, ParseLimits, parsing::limits::CACHE_CAPACITY};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error;

/// Overrides the default config file location.
pub const CONFIG_PATH_ENV: &str = "NOTEMARK_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Parser settings. Every key is optional; missing keys keep the built-in
/// limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of parse results kept in the LRU cache. Zero disables caching.
    pub cache_capacity: usize,
    pub limits: ParseLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: CACHE_CAPACITY,
            limits: ParseLimits::default(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    /// `$NOTEMARK_CONFIG` if set (shell variables and tilde expanded),
    /// otherwise `~/.config/notemark/config.toml`.
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let path = PathBuf::from(path);
            return Self::expand_path(&path).unwrap_or(path);
        }
        let config_dir = shellexpand::tilde("~/.config/notemark");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Builds a parser with these limits and a cache of the configured size.
    pub fn parser(&self) -> MarkdownParser {
        MarkdownParser::with_limits(self.limits)
            .with_cache(Arc::new(ParseCache::new(self.cache_capacity)))
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
