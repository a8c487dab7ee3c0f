//! Audit trail of module verification outcomes
//!
//! Every verification pass that reaches the lock file appends one JSON line to
//! `<state dir>/modguard/audit.log` (or `general.audit_path`):
//!
//! ```json
//! {"timestamp":"2024-05-01T09:30:00+00:00","event":"verify.tamper","data":{"lock_file":".module_hashes.json","error":"Module vpc has changed! ..."}}
//! ```
//!
//! The trail is advisory. A write failure never changes the verification result.

use crate::config::{schema::Config, ConfigManager};
use chrono::Utc;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// Outcome of a verification pass worth recording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditEvent {
    /// Every checked-out module matched or was recorded
    VerifyOk,
    /// A module changed or is missing from a frozen lock file
    VerifyTamper,
    /// The pass failed for another reason (metadata, lock file, IO)
    VerifyFailed,
}

impl AuditEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VerifyOk => "verify.ok",
            Self::VerifyTamper => "verify.tamper",
            Self::VerifyFailed => "verify.failed",
        }
    }
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Appends verification events to the audit file
pub struct AuditLog {
    enabled: bool,
    path: PathBuf,
}

impl AuditLog {
    pub fn new(config: &Config) -> Self {
        let path = match &config.general.audit_path {
            Some(path) => path.clone(),
            None => ConfigManager::audit_log_path(),
        };
        Self {
            enabled: config.general.audit_log,
            path,
        }
    }

    /// Record a verification outcome for `lock_file`
    ///
    /// `detail` is merged into the event data next to the lock file path.
    pub async fn record(&self, event: AuditEvent, lock_file: &str, detail: Value) {
        if !self.enabled {
            return;
        }

        let mut data = serde_json::json!({ "lock_file": lock_file });
        if let (Some(data), Value::Object(detail)) = (data.as_object_mut(), detail) {
            data.extend(detail);
        }

        let entry = serde_json::json!({
            "timestamp": Utc::now().to_rfc3339(),
            "event": event.as_str(),
            "data": data,
        });

        if let Err(e) = self.append(&format!("{}\n", entry)).await {
            warn!("Could not record {} in {}: {}", event, self.path.display(), e);
        }
    }

    async fn append(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut trail = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        trail.write_all(line.as_bytes()).await?;
        trail.flush().await
    }
}
