//! modguard - Terraform module integrity guard
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use modguard::cli::{Cli, Commands};
use modguard::config::{ConfigManager, Paths};
use modguard::error::{ModguardError, ModguardResult};
use modguard::tool::create_runner;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => exit_code(code),
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

/// Map a tool exit code onto a process exit code
fn exit_code(code: i32) -> ExitCode {
    match u8::try_from(code) {
        Ok(code) => ExitCode::from(code),
        Err(_) => ExitCode::FAILURE,
    }
}

async fn run() -> ModguardResult<i32> {
    let cli = Cli::parse();

    let root = match cli.chdir {
        Some(ref dir) => dir.clone(),
        None => std::env::current_dir()
            .map_err(|e| ModguardError::io("getting current directory", e))?,
    };

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(&root),
    };
    let config = config_manager.load().await?;

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("modguard=warn"),
        1 => EnvFilter::new("modguard=info"),
        _ => EnvFilter::new("modguard=debug"),
    };

    if config.general.log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .init();
    }

    debug!("Working directory: {}", root.display());

    let mut paths = Paths::resolve(&root, &config);
    if let Some(ref data_dir) = cli.data_dir {
        debug!("Using terraform data directory {}", data_dir.display());
        paths = paths.with_data_dir(&root, data_dir);
    }

    let runner = create_runner(&config, &root, cli.data_dir.as_deref());

    match cli.command {
        Commands::Init(args) => {
            modguard::cli::commands::init(args, &config, &paths, runner.as_ref()).await
        }
        Commands::Verify(args) => modguard::cli::commands::verify(args, &config, &paths)
            .await
            .map(|()| 0),
        Commands::Hashes(args) => modguard::cli::commands::hashes(args, &paths)
            .await
            .map(|()| 0),
        Commands::External(args) => {
            modguard::cli::commands::passthrough(args, runner.as_ref()).await
        }
    }
}
