use clap::Parser;
use iam_mfa_audit::{Cli, handlers::run_audit_mode};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    run_audit_mode(&cli)
}
