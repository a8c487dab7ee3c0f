//! Terraform process runner
//!
//! Runs the configured program directly, inheriting stdin, stdout and
//! stderr so the user sees terraform's own output and prompts.

use crate::error::{ModguardError, ModguardResult};
use crate::tool::runner::ToolRunner;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Runs `terraform` (or a compatible program such as `tofu`)
pub struct TerraformCli {
    program: String,
    workdir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
}

impl TerraformCli {
    /// Create a runner for the given program
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            workdir: None,
            data_dir: None,
        }
    }

    /// Run the program in `dir` instead of the current directory
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.workdir = Some(dir.to_path_buf());
        self
    }

    /// Export `TF_DATA_DIR` to the child process
    pub fn with_data_dir(mut self, dir: Option<&Path>) -> Self {
        self.data_dir = dir.map(Path::to_path_buf);
        self
    }
}

impl Default for TerraformCli {
    fn default() -> Self {
        Self::new("terraform")
    }
}

#[async_trait]
impl ToolRunner for TerraformCli {
    async fn run(&self, args: &[String]) -> ModguardResult<i32> {
        debug!("Executing interactively: {} {:?}", self.program, args);

        let mut cmd = Command::new(&self.program);
        if let Some(ref dir) = self.workdir {
            cmd.current_dir(dir);
        }
        if let Some(ref dir) = self.data_dir {
            cmd.env("TF_DATA_DIR", dir);
        }

        let status = cmd
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| {
                ModguardError::command_failed(format!("{} {}", self.program, args.join(" ")), e)
            })?;

        Ok(status.code().unwrap_or(-1))
    }

    fn program(&self) -> &str {
        &self.program
    }
}
