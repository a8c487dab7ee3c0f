//! Configuration schema for modguard
//!
//! Configuration is read from `.modguard.toml` in the working directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Where terraform keeps modules and where the lock file lives
    pub paths: PathsConfig,

    /// Module registry settings
    pub registry: RegistryConfig,

    /// Wrapped tool settings
    pub tool: ToolConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,

    /// Enable audit logging
    pub audit_log: bool,

    /// Audit log location (defaults to the user state directory)
    pub audit_path: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
            audit_log: true,
            audit_path: None,
        }
    }
}

/// Filesystem locations, relative to the working directory unless absolute
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory terraform checks modules out into
    pub modules_dir: PathBuf,

    /// Module resolution record written by terraform init
    pub metadata_file: PathBuf,

    /// Lock file mapping module name to content digest
    pub lock_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            modules_dir: PathBuf::from(".terraform/modules"),
            metadata_file: PathBuf::from(".terraform/modules/modules.json"),
            lock_file: PathBuf::from(".module_hashes.json"),
        }
    }
}

/// Module registry settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Host identifier matched against each module's source string
    pub host: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            host: "registry.terraform.io".to_string(),
        }
    }
}

/// Wrapped tool settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Program to run for init and pass-through commands
    pub program: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: "terraform".to_string(),
        }
    }
}
