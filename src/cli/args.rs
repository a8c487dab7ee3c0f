//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// modguard - Terraform module integrity guard
///
/// Wraps terraform and pins the content of registry modules to a lock file.
/// `init` is verified; every other subcommand is passed through unchanged.
#[derive(Parser, Debug)]
#[command(name = "modguard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path (defaults to .modguard.toml in the working directory)
    #[arg(short, long, global = true, env = "MODGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Working directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Terraform data directory holding the modules checkout
    #[arg(long, global = true, env = "TF_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run terraform init, then verify registry modules against the lock file
    Init(InitArgs),

    /// Verify registry modules against the lock file without running terraform
    Verify(VerifyArgs),

    /// Show the digests recorded in the lock file
    Hashes(HashesArgs),

    /// Any other terraform subcommand, passed through unchanged
    #[command(external_subcommand)]
    External(Vec<String>),
}

/// Arguments for the init command
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Arguments forwarded to terraform init
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Arguments for the verify command
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Fail on modules missing from the lock file instead of recording them
    #[arg(long)]
    pub frozen: bool,
}

/// Arguments for the hashes command
#[derive(Parser, Debug)]
pub struct HashesArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Output format for the hashes command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (name and digest per line)
    Plain,
}
