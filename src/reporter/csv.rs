use crate::audit::AuditRun;
use crate::reporter::Reporter;

pub const CSV_HEADER: &str = "account_name,has_console_access,mfa_enabled,status";

/// Tabular export: a header row, then one row per record in audit order.
pub struct CsvReporter;

impl CsvReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for CsvReporter {
    fn report(&self, run: &AuditRun) -> String {
        let mut output = String::with_capacity(CSV_HEADER.len() + 1 + run.records.len() * 48);
        output.push_str(CSV_HEADER);
        output.push('\n');
        for record in &run.records {
            output.push_str(&format!(
                "{},{},{},{}\n",
                csv_escape(&record.account_name),
                record.has_console_access,
                record.mfa_enabled,
                record.verdict
            ));
        }
        output
    }
}

/// Quote a field when it holds a separator, quote or line break.
fn csv_escape(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
