//! Lock file persistence
//!
//! The lock file is a flat JSON object mapping module name to content digest:
//!
//! ```json
//! {
//!   "eks": "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08",
//!   "vpc": "60303ae22b998861bce3b28f33eec1be758a213c86c93c076dbe9f558c11c752"
//! }
//! ```
//!
//! Keys are written sorted so the file diffs cleanly under version control.

use crate::error::{ModguardError, ModguardResult};
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Last known good digest per module name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockStore {
    entries: BTreeMap<String, String>,
}

impl LockStore {
    /// Load the lock file, or an empty store if it does not exist
    pub fn load(path: &Path) -> ModguardResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} is missing, starting with an empty lock", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ModguardError::CorruptLockFile {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        };

        let entries: BTreeMap<String, String> =
            serde_json::from_str(&content).map_err(|e| ModguardError::CorruptLockFile {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        debug!("Loaded {} entries from {}", entries.len(), path.display());
        Ok(Self { entries })
    }

    /// Save the store, replacing the lock file atomically (temp file + rename)
    pub fn save(&self, path: &Path) -> ModguardResult<()> {
        let mut content = serde_json::to_string_pretty(&self.entries)?;
        content.push('\n');

        let tmp_path = temp_path(path);
        let result = write_and_rename(path, &tmp_path, content.as_bytes());
        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result.map_err(|source| ModguardError::PersistFailure {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Wrote {} entries to {}", self.entries.len(), path.display());
        Ok(())
    }

    /// Recorded digest for a module
    pub fn get(&self, module_name: &str) -> Option<&str> {
        self.entries.get(module_name).map(String::as_str)
    }

    /// Record a digest, returning the previous one
    pub fn insert(
        &mut self,
        module_name: impl Into<String>,
        digest: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(module_name.into(), digest.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in module name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_and_rename(path: &Path, tmp_path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(tmp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);

    fs::rename(tmp_path, path)
}
