//! Init command - run terraform init, then verify registry modules

use crate::cli::args::InitArgs;
use crate::cli::commands::verify;
use crate::config::{Config, Paths};
use crate::error::ModguardResult;
use crate::integrity::ReconcileMode;
use crate::tool::ToolRunner;
use tracing::warn;

/// Execute the init command, returning the exit code to report
///
/// Verification only runs when terraform init succeeded; otherwise
/// terraform's exit code is passed through untouched.
pub async fn execute(
    args: InitArgs,
    config: &Config,
    paths: &Paths,
    runner: &dyn ToolRunner,
) -> ModguardResult<i32> {
    let mut tool_args = vec!["init".to_string()];
    tool_args.extend(args.args);

    let code = runner.run(&tool_args).await?;
    if code != 0 {
        warn!(
            "{} init exited with code {}, skipping module check",
            runner.program(),
            code
        );
        return Ok(code);
    }

    verify::check(config, paths, ReconcileMode::Record).await?;
    Ok(0)
}
