//! Pass-through - forward any other subcommand to terraform

use crate::error::ModguardResult;
use crate::tool::ToolRunner;
use tracing::debug;

/// Run the tool with the given arguments and return its exit code
pub async fn execute(args: Vec<String>, runner: &dyn ToolRunner) -> ModguardResult<i32> {
    debug!("Passing through to {}: {:?}", runner.program(), args);
    runner.run(&args).await
}
