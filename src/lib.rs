//! modguard - Terraform module integrity guard
//!
//! Wraps `terraform init` and pins the content of every registry-sourced
//! module to a SHA256 digest in a lock file. A module whose content drifts
//! from its recorded digest stops the workflow.

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod integrity;
pub mod tool;
pub mod ui;

pub use error::{ModguardError, ModguardResult};
