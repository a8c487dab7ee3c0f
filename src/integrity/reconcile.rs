//! Reconciliation of module checkouts against the lock store
//!
//! Each registry module is fingerprinted and compared with its recorded
//! digest. The first mismatch aborts the whole pass, and the updated store is
//! only handed back when every module reconciles.

use crate::error::{ModguardError, ModguardResult};
use crate::integrity::fingerprint::ModuleDigest;
use crate::integrity::lockstore::LockStore;
use crate::integrity::metadata::RegistryModule;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// How first-seen modules are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconcileMode {
    /// Record digests for modules missing from the lock store
    #[default]
    Record,
    /// Fail on modules missing from the lock store
    Frozen,
}

/// Outcome for a single module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Not in the lock store; digest recorded
    New,
    /// Digest matches the lock store
    Unchanged,
    /// Declared in metadata but never checked out
    Skipped,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::New => "new",
            Self::Unchanged => "unchanged",
            Self::Skipped => "skipped",
        };
        write!(f, "{}", name)
    }
}

/// Per-module result of a reconciliation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleReport {
    /// Module name (lock store key)
    pub module_name: String,
    /// Checkout directory that was fingerprinted
    pub path: PathBuf,
    /// Computed digest, absent for skipped modules
    pub digest: Option<String>,
    pub classification: Classification,
}

/// Result of a successful reconciliation pass
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// Module outcomes in processing order
    pub modules: Vec<ModuleReport>,
    /// Lock store to persist
    pub lock: LockStore,
}

impl Reconciliation {
    /// Number of modules with the given classification
    pub fn count(&self, classification: Classification) -> usize {
        self.modules
            .iter()
            .filter(|m| m.classification == classification)
            .count()
    }
}

/// Reconcile registry modules against a loaded lock store
///
/// Never writes to disk. On `TamperDetected` the remaining modules are not
/// processed and the partially updated store is dropped.
pub fn reconcile(
    modules: &[RegistryModule],
    modules_dir: &Path,
    mut lock: LockStore,
    mode: ReconcileMode,
) -> ModguardResult<Reconciliation> {
    let mut reports = Vec::with_capacity(modules.len());

    for module in modules {
        let path = modules_dir.join(&module.key);
        let present = path
            .try_exists()
            .map_err(|source| ModguardError::UnreadableModule {
                path: path.clone(),
                source,
            })?;
        if !present {
            warn!("Module path {} not found, skipping", path.display());
            reports.push(ModuleReport {
                module_name: ModuleDigest::name_for(&path),
                path,
                digest: None,
                classification: Classification::Skipped,
            });
            continue;
        }

        let ModuleDigest {
            module_name,
            digest,
        } = ModuleDigest::compute(&path)?;
        debug!(
            "{} ({}{}) in {} -> {}",
            module_name,
            module.source,
            module
                .version
                .as_deref()
                .map(|v| format!(" {}", v))
                .unwrap_or_default(),
            module.dir.as_deref().unwrap_or(&module.key),
            digest
        );

        let classification = match lock.get(&module_name) {
            Some(recorded) if recorded == digest => Classification::Unchanged,
            Some(recorded) => {
                return Err(ModguardError::TamperDetected {
                    module: module_name,
                    expected: recorded.to_string(),
                    actual: digest,
                });
            }
            None if mode == ReconcileMode::Frozen => {
                return Err(ModguardError::UnlockedModule(module_name));
            }
            None => {
                info!("Recording digest for new module {}", module_name);
                lock.insert(module_name.clone(), digest.clone());
                Classification::New
            }
        };

        reports.push(ModuleReport {
            module_name,
            path,
            digest: Some(digest),
            classification,
        });
    }

    Ok(Reconciliation {
        modules: reports,
        lock,
    })
}
