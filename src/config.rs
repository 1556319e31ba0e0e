//! Configuration
//!
//! Settings come from a TOML file, then environment variables, then CLI flags
//! (applied by the binaries). Every field has a default, so no file is required.
//!
//! ```toml
//! dataset = "/data/gapminder.csv"
//! locale = "de"
//!
//! [render]
//! width = 1200
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Gapminder CSV to load at startup.
    #[serde(default)]
    pub dataset: Option<PathBuf>,

    /// Number formatting locale for text output (`en`, `de`, `fr`, ...).
    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default)]
    pub render: RenderConfig,
}

/// Image export settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    /// Overrides the chart's own canvas height when set.
    #[serde(default)]
    pub height: Option<u32>,
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_width() -> u32 {
    1000
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            locale: default_locale(),
            render: RenderConfig::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Used when neither config, env nor flags name a dataset.
pub const DEFAULT_DATASET: &str = "gapminder.csv";

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `GAPDASH_DATASET` / `GAPDASH_LOCALE` overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F: Fn(&str) -> Option<String>>(&mut self, lookup: F) {
        if let Some(path) = lookup("GAPDASH_DATASET").filter(|s| !s.trim().is_empty()) {
            self.dataset = Some(PathBuf::from(path));
        }
        if let Some(locale) = lookup("GAPDASH_LOCALE").filter(|s| !s.trim().is_empty()) {
            self.locale = locale;
        }
    }

    /// Load an explicit file, or the first default location that exists,
    /// then apply environment overrides.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => Self::load_default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("gapdash").join("config.toml")),
            Some(PathBuf::from("./gapdash.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        log::info!("loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => log::warn!("ignoring config {}: {}", path.display(), e),
                }
            }
        }
        Self::default()
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.dataset
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET))
    }
}
