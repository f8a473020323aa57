//! Audit mode handler.

use colored::Colorize;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::{debug, info, warn};

use crate::audit::{AuditRun, Auditor};
use crate::cli::{Cli, OutputFormat};
use crate::config::{Config, EffectiveConfig, LoadedConfig};
use crate::error::Result;
use crate::export::ExportWriter;
use crate::provider::{AwsIamProvider, IdentityProvider, InventoryProvider};
use crate::reporter::progress::AuditProgress;
use crate::reporter::terminal::{TerminalReporter, format_strict_result};
use crate::reporter::{Reporter, json::JsonReporter};
use crate::telemetry::init_telemetry;

use super::error_chain;

/// Run one full audit pass: report to stdout, then export.
pub fn run_audit_mode(cli: &Cli) -> ExitCode {
    let (loaded, effective) = match load_effective_config(cli) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), error_chain(&e));
            return ExitCode::from(2);
        }
    };

    if effective.no_color {
        colored::control::set_override(false);
    }
    init_telemetry(&effective);
    for skipped in &loaded.skipped {
        warn!(error = %error_chain(skipped), "Skipping unreadable config file");
    }
    debug!(origin = %loaded.origin, "Using configuration");

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("{} Failed to create async runtime: {}", "Error:".red(), e);
            return ExitCode::from(2);
        }
    };

    let result = match &effective.inventory {
        Some(path) => {
            info!(path = %path.display(), "Auditing offline inventory");
            match InventoryProvider::from_file(path) {
                Ok(provider) => runtime.block_on(execute(provider, &effective)),
                Err(e) => {
                    eprintln!("{} {}", "Error:".red(), error_chain(&e));
                    return ExitCode::from(2);
                }
            }
        }
        None => runtime.block_on(async {
            let provider = AwsIamProvider::from_env(
                effective.aws_profile.as_deref(),
                effective.aws_region.as_deref(),
            )
            .await;
            execute(provider, &effective).await
        }),
    };

    let run = match result {
        Ok(run) => run,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), error_chain(&e));
            return ExitCode::from(2);
        }
    };

    println!("{}", format_run(&effective, &run));

    let mut exports_ok = true;
    if effective.export {
        let outcome = ExportWriter::new(&effective.output_dir).write_all(&run);
        for path in &outcome.written {
            notice(&effective, &format!("Report exported to {}", path.display()));
        }
        for err in &outcome.errors {
            eprintln!("{} {}", "Error:".red(), error_chain(err));
        }
        exports_ok = outcome.is_success();
    }

    let status = exit_status(&effective, &run, exports_ok);
    if effective.strict && effective.format == OutputFormat::Terminal {
        println!("{}", format_strict_result(status));
    }

    debug!(
        total = run.summary.total_accounts,
        interrupted = run.interrupted,
        exports_ok,
        status,
        "Audit finished"
    );
    ExitCode::from(status)
}

fn load_effective_config(cli: &Cli) -> Result<(LoadedConfig, EffectiveConfig)> {
    let cwd = std::env::current_dir().ok();
    let loaded = Config::resolve(cli.config.as_deref(), cwd.as_deref())?;
    let effective = EffectiveConfig::from_cli_and_config(cli, &loaded.config)?;
    Ok((loaded, effective))
}

async fn execute<P: IdentityProvider>(provider: P, effective: &EffectiveConfig) -> Result<AuditRun> {
    let auditor = Auditor::new(provider).with_options(effective.audit);
    let accounts = auditor.list_accounts().await?;
    let progress = AuditProgress::for_accounts(
        accounts.len(),
        std::io::stderr().is_terminal(),
        effective.ci,
    );
    auditor
        .run_until(&accounts, &progress, shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

pub fn format_run(effective: &EffectiveConfig, run: &AuditRun) -> String {
    match effective.format {
        OutputFormat::Terminal => {
            TerminalReporter::new(effective.verbose).report(run)
        }
        OutputFormat::Json => JsonReporter::new().report(run),
    }
}

/// Export notices go to stderr when stdout carries JSON.
fn notice(effective: &EffectiveConfig, message: &str) {
    match effective.format {
        OutputFormat::Terminal => println!("{}", message),
        OutputFormat::Json => eprintln!("{}", message),
    }
}

/// 0 complete, 1 strict with failing users, 2 interrupted or export failure.
pub fn exit_status(effective: &EffectiveConfig, run: &AuditRun, exports_ok: bool) -> u8 {
    if !exports_ok || run.interrupted {
        2
    } else if effective.strict && run.has_failures() {
        1
    } else {
        0
    }
}
