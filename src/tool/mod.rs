//! Wrapped tool execution
//!
//! Every subcommand modguard does not handle itself is forwarded to the
//! tool unchanged, and the tool's exit code becomes modguard's.

pub mod runner;
pub mod terraform;

pub use runner::ToolRunner;
pub use terraform::TerraformCli;

use crate::config::Config;
use std::path::Path;

/// Create the runner for the configured tool, working in `root`
pub fn create_runner(
    config: &Config,
    root: &Path,
    data_dir: Option<&Path>,
) -> Box<dyn ToolRunner> {
    Box::new(
        TerraformCli::new(config.tool.program.clone())
            .in_dir(root)
            .with_data_dir(data_dir),
    )
}
