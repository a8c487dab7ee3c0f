//! Hashes command - show the lock file contents

use crate::cli::args::{HashesArgs, OutputFormat};
use crate::config::Paths;
use crate::error::ModguardResult;
use crate::integrity::LockStore;
use crate::ui::{self, UiContext};
use console::style;
use std::collections::BTreeMap;

/// Execute the hashes command
pub async fn execute(args: HashesArgs, paths: &Paths) -> ModguardResult<()> {
    let lock = LockStore::load(&paths.lock_file)?;

    if lock.is_empty() {
        match args.format {
            OutputFormat::Json => println!("{{}}"),
            OutputFormat::Plain => {}
            OutputFormat::Table => {
                let ctx = UiContext::detect();
                ui::step_info(
                    &ctx,
                    &format!("No digests recorded in {}", paths.lock_file.display()),
                );
            }
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(&lock, paths),
        OutputFormat::Json => print_json(&lock)?,
        OutputFormat::Plain => print_plain(&lock),
    }

    Ok(())
}

fn print_table(lock: &LockStore, paths: &Paths) {
    let ctx = UiContext::detect();
    ui::intro(&ctx, &paths.lock_file.display().to_string());

    println!("{:<30} {:<64}", style("MODULE").bold(), style("DIGEST").bold());
    println!("{}", "-".repeat(95));

    for (name, digest) in lock.iter() {
        println!("{:<30} {}", name, style(digest).dim());
    }

    println!();
    println!("{} module(s)", lock.len());
}

fn print_json(lock: &LockStore) -> ModguardResult<()> {
    let map: BTreeMap<_, _> = lock.iter().collect();
    println!("{}", serde_json::to_string_pretty(&map)?);
    Ok(())
}

fn print_plain(lock: &LockStore) {
    for (name, digest) in lock.iter() {
        println!("{} {}", name, digest);
    }
}
