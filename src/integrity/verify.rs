//! One verification pass: metadata -> reconcile -> lock file

use crate::config::Paths;
use crate::error::ModguardResult;
use crate::integrity::lockstore::LockStore;
use crate::integrity::metadata::read_registry_modules;
use crate::integrity::reconcile::{reconcile, Classification, ReconcileMode, Reconciliation};
use tracing::{debug, info};

/// Terminal outcome of a successful verification pass
#[derive(Debug, Clone)]
pub enum VerifyOutcome {
    /// No module metadata; nothing to verify
    NoMetadata,
    /// Metadata lists no registry modules; lock file untouched
    NoRegistryModules,
    /// No declared module was checked out; lock file untouched
    NothingCheckedOut(Reconciliation),
    /// Every module reconciled and the lock file was written
    Verified(Reconciliation),
}

/// Verify registry module checkouts against the lock file
///
/// The lock file is only written after every module reconciles. Any error
/// leaves it exactly as it was.
pub fn verify(
    paths: &Paths,
    registry_host: &str,
    mode: ReconcileMode,
) -> ModguardResult<VerifyOutcome> {
    let Some(modules) = read_registry_modules(&paths.metadata_file, registry_host)? else {
        info!("No module metadata found, skipping module check");
        return Ok(VerifyOutcome::NoMetadata);
    };

    if modules.is_empty() {
        info!("No modules from {} found, no lock file check needed", registry_host);
        return Ok(VerifyOutcome::NoRegistryModules);
    }

    let lock = LockStore::load(&paths.lock_file)?;
    debug!(
        "Reconciling {} modules against {} recorded digests",
        modules.len(),
        lock.len()
    );

    let result = reconcile(&modules, &paths.modules_dir, lock, mode)?;
    if result.count(Classification::Skipped) == result.modules.len() {
        info!("No module checkouts found, {} left as is", paths.lock_file.display());
        return Ok(VerifyOutcome::NothingCheckedOut(result));
    }

    result.lock.save(&paths.lock_file)?;
    info!("{} has been updated", paths.lock_file.display());

    Ok(VerifyOutcome::Verified(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModguardError;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const REGISTRY: &str = "registry.terraform.io";

    fn paths(root: &Path) -> Paths {
        Paths {
            modules_dir: root.join(".terraform/modules"),
            metadata_file: root.join(".terraform/modules/modules.json"),
            lock_file: root.join(".module_hashes.json"),
        }
    }

    fn write_metadata(paths: &Paths, keys: &[&str]) {
        let modules: Vec<_> = keys
            .iter()
            .map(|k| {
                serde_json::json!({
                    "Key": k,
                    "Source": format!("registry.terraform.io/acme/{}/aws", k),
                    "Version": "1.0.0",
                })
            })
            .collect();
        fs::create_dir_all(&paths.modules_dir).unwrap();
        fs::write(
            &paths.metadata_file,
            serde_json::json!({ "Modules": modules }).to_string(),
        )
        .unwrap();
    }

    fn checkout(paths: &Paths, key: &str, content: &str) {
        let dir = paths.modules_dir.join(key);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("main.tf"), content).unwrap();
    }

    #[test]
    fn no_metadata_is_noop() {
        let dir = TempDir::new().unwrap();
        let paths = paths(dir.path());

        let outcome = verify(&paths, REGISTRY, ReconcileMode::Record).unwrap();
        assert!(matches!(outcome, VerifyOutcome::NoMetadata));
        assert!(!paths.lock_file.exists());
    }

    #[test]
    fn empty_set_does_not_read_or_create_lock() {
        let dir = TempDir::new().unwrap();
        let paths = paths(dir.path());
        write_metadata(&paths, &[]);
        // A corrupt lock file would fail the pass if it were read
        fs::write(&paths.lock_file, "garbage").unwrap();

        let outcome = verify(&paths, REGISTRY, ReconcileMode::Record).unwrap();
        assert!(matches!(outcome, VerifyOutcome::NoRegistryModules));
        assert_eq!(fs::read_to_string(&paths.lock_file).unwrap(), "garbage");
    }

    #[test]
    fn first_run_creates_lock() {
        let dir = TempDir::new().unwrap();
        let paths = paths(dir.path());
        write_metadata(&paths, &["vpc"]);
        checkout(&paths, "vpc", "vpc v1");

        let outcome = verify(&paths, REGISTRY, ReconcileMode::Record).unwrap();
        let VerifyOutcome::Verified(result) = outcome else {
            panic!("expected Verified");
        };
        assert_eq!(result.count(Classification::New), 1);

        let lock = LockStore::load(&paths.lock_file).unwrap();
        assert!(lock.get("vpc").is_some());
    }

    #[test]
    fn missing_checkouts_do_not_create_lock() {
        let dir = TempDir::new().unwrap();
        let paths = paths(dir.path());
        write_metadata(&paths, &["vpc", "eks"]);

        let outcome = verify(&paths, REGISTRY, ReconcileMode::Record).unwrap();
        let VerifyOutcome::NothingCheckedOut(result) = outcome else {
            panic!("expected NothingCheckedOut");
        };
        assert_eq!(result.count(Classification::Skipped), 2);
        assert!(!paths.lock_file.exists());
    }

    #[test]
    fn missing_checkouts_leave_existing_lock_alone() {
        let dir = TempDir::new().unwrap();
        let paths = paths(dir.path());
        write_metadata(&paths, &["vpc"]);
        // Hand-written and unsorted, so any rewrite would show
        fs::write(&paths.lock_file, r#"{"vpc":"abc","eks":"def"}"#).unwrap();

        let outcome = verify(&paths, REGISTRY, ReconcileMode::Record).unwrap();
        assert!(matches!(outcome, VerifyOutcome::NothingCheckedOut(_)));
        assert_eq!(
            fs::read_to_string(&paths.lock_file).unwrap(),
            r#"{"vpc":"abc","eks":"def"}"#
        );
    }

    #[test]
    fn second_run_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let paths = paths(dir.path());
        write_metadata(&paths, &["vpc", "eks"]);
        checkout(&paths, "vpc", "vpc v1");
        checkout(&paths, "eks", "eks v1");

        verify(&paths, REGISTRY, ReconcileMode::Record).unwrap();
        let first = fs::read_to_string(&paths.lock_file).unwrap();

        let outcome = verify(&paths, REGISTRY, ReconcileMode::Record).unwrap();
        let second = fs::read_to_string(&paths.lock_file).unwrap();

        assert_eq!(first, second);
        let VerifyOutcome::Verified(result) = outcome else {
            panic!("expected Verified");
        };
        assert_eq!(result.count(Classification::Unchanged), 2);
    }

    #[test]
    fn tamper_leaves_lock_file_untouched() {
        let dir = TempDir::new().unwrap();
        let paths = paths(dir.path());
        write_metadata(&paths, &["mod-a", "mod-b"]);
        checkout(&paths, "mod-a", "original");
        verify(&paths, REGISTRY, ReconcileMode::Record).unwrap();
        let before = fs::read_to_string(&paths.lock_file).unwrap();

        // mod-b shows up for the first time while mod-a was altered
        checkout(&paths, "mod-a", "altered");
        checkout(&paths, "mod-b", "brand new");

        let err = verify(&paths, REGISTRY, ReconcileMode::Record).unwrap_err();
        assert!(matches!(err, ModguardError::TamperDetected { ref module, .. } if module == "mod-a"));
        assert_eq!(fs::read_to_string(&paths.lock_file).unwrap(), before);
    }

    #[test]
    fn corrupt_lock_aborts_without_reset() {
        let dir = TempDir::new().unwrap();
        let paths = paths(dir.path());
        write_metadata(&paths, &["vpc"]);
        checkout(&paths, "vpc", "vpc v1");
        fs::write(&paths.lock_file, "{\"vpc\": 42}").unwrap();

        let err = verify(&paths, REGISTRY, ReconcileMode::Record).unwrap_err();
        assert!(matches!(err, ModguardError::CorruptLockFile { .. }));
        assert_eq!(
            fs::read_to_string(&paths.lock_file).unwrap(),
            "{\"vpc\": 42}"
        );
    }

    #[test]
    fn malformed_metadata_aborts() {
        let dir = TempDir::new().unwrap();
        let paths = paths(dir.path());
        fs::create_dir_all(&paths.modules_dir).unwrap();
        fs::write(&paths.metadata_file, "[]").unwrap();

        let err = verify(&paths, REGISTRY, ReconcileMode::Record).unwrap_err();
        assert!(matches!(err, ModguardError::MalformedMetadata { .. }));
    }

    #[test]
    fn frozen_mode_does_not_write() {
        let dir = TempDir::new().unwrap();
        let paths = paths(dir.path());
        write_metadata(&paths, &["vpc"]);
        checkout(&paths, "vpc", "vpc v1");

        let err = verify(&paths, REGISTRY, ReconcileMode::Frozen).unwrap_err();
        assert!(matches!(err, ModguardError::UnlockedModule(_)));
        assert!(!paths.lock_file.exists());
    }
}
