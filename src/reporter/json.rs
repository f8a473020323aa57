use serde::Serialize;

use crate::audit::{AuditRecord, AuditRun};
use crate::reporter::Reporter;

#[derive(Debug, Serialize)]
pub struct ExportMetadata {
    pub start_time: String,
    pub end_time: String,
    pub elapsed_seconds: f64,
    pub total_users: usize,
    pub compliant: usize,
    pub no_console: usize,
    pub non_compliant: usize,
    pub compliance_rate: String,
    pub interrupted: bool,
}

/// Structured export document: run metadata plus ordered findings.
#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub metadata: ExportMetadata,
    pub findings: &'a [AuditRecord],
}

impl<'a> ExportDocument<'a> {
    pub fn from_run(run: &'a AuditRun) -> Self {
        let summary = &run.summary;
        Self {
            metadata: ExportMetadata {
                start_time: summary.start_time_rfc3339(),
                end_time: summary.end_time_rfc3339(),
                elapsed_seconds: (summary.elapsed_seconds() * 100.0).round() / 100.0,
                total_users: summary.total_accounts,
                compliant: summary.compliant_count,
                no_console: summary.no_console_count,
                non_compliant: summary.non_compliant_count(),
                compliance_rate: summary.compliance_rate_label(),
                interrupted: run.interrupted,
            },
            findings: &run.records,
        }
    }
}

pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, run: &AuditRun) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&ExportDocument::from_run(run))
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JsonReporter {
    fn report(&self, run: &AuditRun) -> String {
        self.render(run)
            .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize result: {}"}}"#, e))
    }
}
