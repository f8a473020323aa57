use crate::audit::{AuditRecord, AuditRun, AuditSummary, ComplianceVerdict};
use crate::reporter::Reporter;
use colored::Colorize;

const RULE_WIDTH: usize = 40;

/// Fixed-layout summary block. Plain text, no colour, no I/O.
pub fn format_summary(summary: &AuditSummary) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH)));
    output.push_str(&format!("Total users: {}\n", summary.total_accounts));
    output.push_str(&format!(
        "Compliant (MFA enabled): {}\n",
        summary.compliant_count
    ));
    output.push_str(&format!("No console access: {}\n", summary.no_console_count));
    output.push_str(&format!(
        "Non-compliant: {}\n",
        summary.non_compliant_count()
    ));
    output.push_str(&format!("Audit start: {}\n", summary.start_time_rfc3339()));
    output.push_str(&format!("Audit end: {}\n", summary.end_time_rfc3339()));
    output.push_str(&format!("Elapsed: {:.2}s\n", summary.elapsed_seconds()));
    output.push_str(&format!(
        "Compliance rate: {}\n",
        summary.compliance_rate_label()
    ));
    output
}

/// Closing line for `--strict`, printed once the exit status is settled.
pub fn format_strict_result(exit_status: u8) -> String {
    let result_text = if exit_status == 0 {
        "PASS".green().bold()
    } else {
        "FAIL".red().bold()
    };
    format!("Result: {} (exit code {})", result_text, exit_status)
}

pub struct TerminalReporter {
    verbose: bool,
}

impl TerminalReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn verdict_label(&self, verdict: ComplianceVerdict) -> colored::ColoredString {
        let label = format!("[{}]", verdict);
        match verdict {
            ComplianceVerdict::Pass => label.green().bold(),
            ComplianceVerdict::Fail => label.red().bold(),
            ComplianceVerdict::Info => label.cyan(),
        }
    }

    fn format_record(&self, record: &AuditRecord) -> String {
        format!(
            "Checking: {}\n    {} {}\n",
            record.account_name,
            self.verdict_label(record.verdict),
            record.verdict.message()
        )
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, run: &AuditRun) -> String {
        let mut output = String::new();

        for record in &run.records {
            output.push_str(&self.format_record(record));
        }

        output.push('\n');
        output.push_str(&format_summary(&run.summary));

        if self.verbose && run.has_failures() {
            output.push_str(&format!("\n{}\n", "Console users without MFA:".red().bold()));
            for record in run.failing() {
                output.push_str(&format!("  - {}\n", record.account_name));
            }
        }

        if run.interrupted {
            output.push_str(&format!(
                "\n{} audit interrupted after {} account(s); results are partial\n",
                "Warning:".yellow().bold(),
                run.records.len()
            ));
        }

        output
    }
}
