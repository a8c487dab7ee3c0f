//! Terraform module metadata parsing
//!
//! `terraform init` records every resolved module in
//! `.terraform/modules/modules.json`. Only modules sourced from the registry
//! are pinned; local paths and other origins are ignored.

use crate::error::{ModguardError, ModguardResult};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Parsed `modules.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ModulesManifest {
    #[serde(rename = "Modules")]
    pub modules: Vec<ModuleRecord>,
}

/// One entry of `modules.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleRecord {
    #[serde(rename = "Key")]
    pub key: String,

    #[serde(rename = "Source")]
    pub source: String,

    #[serde(rename = "Version", default)]
    pub version: Option<String>,

    #[serde(rename = "Dir", default)]
    pub dir: Option<String>,
}

/// A module fetched from the remote registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryModule {
    /// Declared source string
    pub source: String,
    /// Checkout path relative to the modules directory
    pub key: String,
    /// Resolved version, if terraform recorded one
    pub version: Option<String>,
    /// Checkout directory as terraform recorded it
    pub dir: Option<String>,
}

impl ModulesManifest {
    /// Parse a manifest from JSON text
    pub fn parse(path: &Path, content: &str) -> ModguardResult<Self> {
        serde_json::from_str(content).map_err(|e| ModguardError::MalformedMetadata {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Keep modules whose source mentions the registry host, in record order
    ///
    /// This is a plain substring match, so any source string that happens to
    /// contain the host is treated as registry-sourced.
    pub fn registry_modules(&self, registry_host: &str) -> Vec<RegistryModule> {
        self.modules
            .iter()
            .filter(|m| m.source.contains(registry_host))
            .map(|m| RegistryModule {
                source: m.source.clone(),
                key: m.key.clone(),
                version: m.version.clone(),
                dir: m.dir.clone(),
            })
            .collect()
    }
}

/// Read the registry-sourced modules from a metadata record
///
/// Returns `Ok(None)` when the record does not exist, which means there is
/// nothing to verify.
pub fn read_registry_modules(
    path: &Path,
    registry_host: &str,
) -> ModguardResult<Option<Vec<RegistryModule>>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No module metadata at {}", path.display());
            return Ok(None);
        }
        Err(e) => {
            return Err(ModguardError::MalformedMetadata {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        }
    };

    let manifest = ModulesManifest::parse(path, &content)?;
    let modules = manifest.registry_modules(registry_host);
    debug!(
        "{} of {} modules come from {}",
        modules.len(),
        manifest.modules.len(),
        registry_host
    );
    Ok(Some(modules))
}
