//! Configuration management for modguard

pub mod schema;

pub use schema::Config;

use crate::error::{ModguardError, ModguardResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Name of the project-local config file
pub const LOCAL_CONFIG_FILE: &str = ".modguard.toml";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a config manager reading `.modguard.toml` under `root`
    pub fn new(root: &Path) -> Self {
        Self {
            config_path: root.join(LOCAL_CONFIG_FILE),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the state directory path
    pub fn state_dir() -> PathBuf {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("modguard")
    }

    /// Get the default audit log path
    pub fn audit_log_path() -> PathBuf {
        Self::state_dir().join("audit.log")
    }

    /// Load configuration, falling back to defaults when the file is missing
    pub async fn load(&self) -> ModguardResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.config_path).await.map_err(|e| {
            ModguardError::io(
                format!("reading config from {}", self.config_path.display()),
                e,
            )
        })?;

        debug!("Loaded config from {}", self.config_path.display());
        toml::from_str(&content).map_err(|e| ModguardError::ConfigInvalid {
            path: self.config_path.clone(),
            reason: e.to_string(),
        })
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

/// Resolved filesystem locations for one verification pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Directory holding one checkout per module key
    pub modules_dir: PathBuf,
    /// Terraform's module resolution record
    pub metadata_file: PathBuf,
    /// Lock file mapping module name to digest
    pub lock_file: PathBuf,
}

impl Paths {
    /// Resolve configured paths against the working root
    pub fn resolve(root: &Path, config: &Config) -> Self {
        Self {
            modules_dir: root.join(&config.paths.modules_dir),
            metadata_file: root.join(&config.paths.metadata_file),
            lock_file: root.join(&config.paths.lock_file),
        }
    }

    /// Point module locations at a terraform data directory (`TF_DATA_DIR`)
    pub fn with_data_dir(mut self, root: &Path, data_dir: &Path) -> Self {
        let modules_dir = root.join(data_dir).join("modules");
        self.metadata_file = modules_dir.join("modules.json");
        self.modules_dir = modules_dir;
        self
    }
}
