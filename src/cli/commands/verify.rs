//! Verify command - check registry modules against the lock file

use crate::audit::{AuditEvent, AuditLog};
use crate::cli::args::VerifyArgs;
use crate::config::{Config, Paths};
use crate::error::{ModguardError, ModguardResult};
use crate::integrity::{self, Classification, ReconcileMode, Reconciliation, VerifyOutcome};
use crate::ui::{self, UiContext};

/// Execute the verify command
pub async fn execute(args: VerifyArgs, config: &Config, paths: &Paths) -> ModguardResult<()> {
    let mode = if args.frozen {
        ReconcileMode::Frozen
    } else {
        ReconcileMode::Record
    };
    check(config, paths, mode).await
}

/// Run one verification pass, report it and record it in the audit log
pub async fn check(config: &Config, paths: &Paths, mode: ReconcileMode) -> ModguardResult<()> {
    let ctx = UiContext::detect();
    let audit = AuditLog::new(config);
    let lock_file = paths.lock_file.display().to_string();

    match integrity::verify(paths, &config.registry.host, mode) {
        Ok(VerifyOutcome::NoMetadata) => {
            ui::step_info(&ctx, "No modules metadata file found. Skipping module check.");
            Ok(())
        }
        Ok(VerifyOutcome::NoRegistryModules) => {
            ui::step_info(
                &ctx,
                "No modules from the registry were found. No lock file check needed.",
            );
            Ok(())
        }
        Ok(VerifyOutcome::NothingCheckedOut(result)) => {
            report(&ctx, &result);
            ui::step_info(
                &ctx,
                "None of the registry modules are checked out. Lock file left unchanged.",
            );
            Ok(())
        }
        Ok(VerifyOutcome::Verified(result)) => {
            report(&ctx, &result);
            audit
                .record(
                    AuditEvent::VerifyOk,
                    &lock_file,
                    serde_json::json!({
                        "new": result.count(Classification::New),
                        "unchanged": result.count(Classification::Unchanged),
                        "skipped": result.count(Classification::Skipped),
                    }),
                )
                .await;
            ui::outro_success(
                &ctx,
                &format!("{} has been successfully updated", paths.lock_file.display()),
            );
            Ok(())
        }
        Err(e) => {
            let event = if e.is_integrity_failure() {
                AuditEvent::VerifyTamper
            } else {
                AuditEvent::VerifyFailed
            };
            audit
                .record(event, &lock_file, serde_json::json!({ "error": e.to_string() }))
                .await;
            match &e {
                ModguardError::TamperDetected { module, .. } => {
                    ui::step_error_detail(&ctx, "Content digest mismatch", module)
                }
                ModguardError::UnlockedModule(module) => {
                    ui::step_error_detail(&ctx, "Not in the lock file", module)
                }
                _ => {}
            }
            ui::outro_error(&ctx, "Module integrity check failed");
            Err(e)
        }
    }
}

fn report(ctx: &UiContext, result: &Reconciliation) {
    for module in &result.modules {
        let short = module
            .digest
            .as_deref()
            .map(|d| &d[..12.min(d.len())])
            .unwrap_or_default();
        match module.classification {
            Classification::New => ui::step_new_detail(
                ctx,
                &format!("{} added to the lock file", module.module_name),
                short,
            ),
            Classification::Unchanged => {
                ui::step_ok_detail(ctx, &format!("{} unchanged", module.module_name), short)
            }
            Classification::Skipped => ui::step_warn(
                ctx,
                &format!("Module path {} not found", module.path.display()),
            ),
        }
    }
}
