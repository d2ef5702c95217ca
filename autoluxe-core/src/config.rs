use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// YAML config file structure (`~/.autoluxe/config.yaml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigYaml {
    /// Base URL of the catalog REST service
    pub backend_url: Option<String>,
    /// Cars requested per listing page
    pub page_size: Option<u32>,
    /// Directory holding the browsing session (filters, auth token)
    pub session_dir: Option<PathBuf>,
}

/// Application configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub backend_url: String,
    pub page_size: u32,
    pub session_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            session_dir: default_session_dir(),
        }
    }
}

fn default_session_dir() -> PathBuf {
    std::env::temp_dir().join("autoluxe-session")
}

impl Config {
    /// Load from `.env`/environment in dev mode, otherwise from config.yaml.
    pub fn load() -> Result<Self, ConfigError> {
        let dev_mode = Self::is_dev_mode() || dotenvy::dotenv().is_ok();
        if dev_mode {
            info!("Dev mode activated - loading from environment");
            Self::from_env()
        } else {
            info!("Production mode - loading from config.yaml");
            Self::from_config_file()
        }
    }

    pub fn is_dev_mode() -> bool {
        std::env::var("AUTOLUXE_DEV_MODE").is_ok()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from a variable lookup. Empty values count as unset.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let page_size = match var("AUTOLUXE_PAGE_SIZE") {
            Some(raw) => parse_page_size(&raw)?,
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            backend_url: var("AUTOLUXE_BACKEND_URL")
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            page_size,
            session_dir: var("AUTOLUXE_SESSION_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_session_dir),
        })
    }

    /// Path of the YAML config file, if a home directory is known.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".autoluxe").join("config.yaml"))
    }

    fn from_config_file() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::from_yaml_path(&path),
            _ => {
                info!("No config.yaml found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_yaml_path(path: &Path) -> Result<Self, ConfigError> {
        let yaml: ConfigYaml = serde_yaml::from_str(&std::fs::read_to_string(path)?)?;
        Self::from_yaml(yaml)
    }

    fn from_yaml(yaml: ConfigYaml) -> Result<Self, ConfigError> {
        if yaml.page_size == Some(0) {
            return Err(ConfigError::Config("page_size must be at least 1".into()));
        }
        Ok(Self {
            backend_url: yaml
                .backend_url
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            page_size: yaml.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            session_dir: yaml.session_dir.unwrap_or_else(default_session_dir),
        })
    }

    pub fn save_to_config_yaml(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = ConfigYaml {
            backend_url: Some(self.backend_url.clone()),
            page_size: Some(self.page_size),
            session_dir: Some(self.session_dir.clone()),
        };
        std::fs::write(path, serde_yaml::to_string(&yaml)?)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Session directory used for the filter state.
    pub fn filters_dir(&self) -> PathBuf {
        self.session_dir.join("filters")
    }

    /// Session directory used for credentials. Kept apart from the filters
    /// so expiring a token does not wipe the selection.
    pub fn auth_dir(&self) -> PathBuf {
        self.session_dir.join("auth")
    }
}

fn parse_page_size(raw: &str) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(size) if size >= 1 => Ok(size),
        _ => Err(ConfigError::Config(format!(
            "AUTOLUXE_PAGE_SIZE must be a positive integer, got {raw:?}"
        ))),
    }
}
