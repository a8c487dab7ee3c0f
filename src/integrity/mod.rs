//! Module integrity verification
//!
//! Pins the content of every registry-sourced Terraform module to a digest
//! in the lock file and refuses to continue when a checkout drifts.
//!
//! # Security Model
//!
//! - Digest is SHA256 over file contents in sorted path order
//! - Hidden entries (`.git`, `.terraform-docs.yml`, ...) are ignored
//! - Any single mismatch fails the whole pass, nothing is written
//! - A corrupt lock file is an error, never an empty baseline
//!
//! # Module States
//!
//! | State | Lock file | Description |
//! |-------|-----------|-------------|
//! | New | digest added | First time this module name is seen |
//! | Unchanged | kept | Content matches the recorded digest |
//! | Skipped | kept | Declared in metadata, no checkout on disk |
//! | Changed | untouched | Run aborts with `TamperDetected` |

pub mod fingerprint;
pub mod lockstore;
pub mod metadata;
pub mod reconcile;
pub mod verify;

pub use fingerprint::{fingerprint_dir, ModuleDigest};
pub use lockstore::LockStore;
pub use metadata::{read_registry_modules, RegistryModule};
pub use reconcile::{reconcile, Classification, ModuleReport, ReconcileMode, Reconciliation};
pub use verify::{verify, VerifyOutcome};
