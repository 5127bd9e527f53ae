//! TOML configuration file loading
//!
//! A configuration file given with `--config-file` must exist. Without one
//! the default location is used if a file is present there.

use crate::app::cli::args::Args;
use crate::core::logging::LogFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_NAMESPACE: &str = "litcode";
const APP_DIR: &str = "Litcode";
const CONFIG_FILE_NAME: &str = "litcode.toml";
const STORAGE_FILE_NAME: &str = "storage.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("The specified configuration file does not exist: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Error reading configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Contents of the configuration file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    pub namespace: String,
    pub storage_file: Option<PathBuf>,
    pub in_memory_storage: bool,
    pub disabled_modules: Vec<String>,
    pub logging: LoggingConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            storage_file: None,
            in_memory_storage: false,
            disabled_modules: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
    pub file: Option<PathBuf>,
    pub color: Option<bool>,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE_NAME))
}

pub fn default_storage_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join(APP_DIR).join(STORAGE_FILE_NAME))
}

impl HostConfig {
    pub fn from_toml(contents: &str, path: &Path) -> ConfigResult<Self> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the configuration
    ///
    /// An explicit path must exist. Without one, the default path is read if
    /// present and defaults are used otherwise.
    pub async fn load(config_file: Option<&Path>) -> ConfigResult<Self> {
        let path = match config_file {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => {
                    log::debug!("No configuration file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
        let config = Self::from_toml(&contents, &path)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

/// Where module storage lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    Memory,
    File(PathBuf),
}

/// Configuration file values with command line overrides applied
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub namespace: String,
    pub storage: StorageLocation,
    pub disabled_modules: Vec<String>,
    pub log_level: Option<String>,
    pub log_format: LogFormat,
    pub log_file: Option<PathBuf>,
    pub color: Option<bool>,
}

impl Settings {
    pub fn resolve(config: HostConfig, args: &Args) -> ConfigResult<Self> {
        let namespace = args.namespace.clone().unwrap_or(config.namespace);
        if namespace.is_empty() {
            return Err(ConfigError::Invalid {
                message: "namespace must not be empty".to_string(),
            });
        }

        let storage = if args.in_memory {
            StorageLocation::Memory
        } else if let Some(path) = &args.storage_file {
            StorageLocation::File(path.clone())
        } else if config.in_memory_storage {
            StorageLocation::Memory
        } else {
            match config.storage_file.or_else(default_storage_path) {
                Some(path) => StorageLocation::File(path),
                None => {
                    log::warn!("No data directory available, module storage will not persist");
                    StorageLocation::Memory
                }
            }
        };

        let mut disabled_modules = config.disabled_modules;
        for id in args.disable.iter().map(|id| id.trim()) {
            if !id.is_empty() && !disabled_modules.iter().any(|existing| existing == id) {
                disabled_modules.push(id.to_string());
            }
        }

        let format_name = args.log_format.as_deref().or(config.logging.format.as_deref());
        let log_format = match format_name {
            Some(name) => LogFormat::from_name(name).ok_or_else(|| ConfigError::Invalid {
                message: format!("unknown log format '{}'", name),
            })?,
            None => LogFormat::default(),
        };

        let log_file = args
            .log_file
            .clone()
            .or(config.logging.file)
            .filter(|path| path.as_os_str() != "none");

        Ok(Self {
            namespace,
            storage,
            disabled_modules,
            log_level: args.log_level.clone().or(config.logging.level),
            log_format,
            log_file,
            color: args.color_override().or(config.logging.color),
        })
    }

    pub fn is_disabled(&self, module_id: &str) -> bool {
        self.disabled_modules.iter().any(|id| id == module_id)
    }
}
