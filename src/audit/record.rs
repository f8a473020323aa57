use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::verdict::ComplianceVerdict;

/// Per-account result of one audit pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub account_name: String,
    pub has_console_access: bool,
    pub mfa_enabled: bool,
    #[serde(rename = "status")]
    pub verdict: ComplianceVerdict,
}

impl AuditRecord {
    pub fn new(
        account_name: impl Into<String>,
        has_console_access: bool,
        mfa_device_count: usize,
    ) -> Self {
        Self {
            account_name: account_name.into(),
            has_console_access,
            mfa_enabled: mfa_device_count > 0,
            verdict: super::classify(has_console_access, mfa_device_count),
        }
    }
}

/// Running counters kept while records are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub total: usize,
    pub compliant: usize,
    pub no_console: usize,
}

impl Tally {
    pub fn record(&mut self, verdict: ComplianceVerdict) {
        self.total += 1;
        match verdict {
            ComplianceVerdict::Pass => self.compliant += 1,
            ComplianceVerdict::Info => self.no_console += 1,
            ComplianceVerdict::Fail => {}
        }
    }

    pub fn from_records(records: &[AuditRecord]) -> Self {
        records.iter().fold(Self::default(), |mut tally, r| {
            tally.record(r.verdict);
            tally
        })
    }
}

/// Aggregate statistics for one run. Built once when the pass ends.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditSummary {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub elapsed: Duration,
    pub total_accounts: usize,
    pub compliant_count: usize,
    pub no_console_count: usize,
}

impl AuditSummary {
    pub fn new(
        tally: Tally,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        elapsed: Duration,
    ) -> Self {
        Self {
            start_time,
            end_time,
            elapsed,
            total_accounts: tally.total,
            compliant_count: tally.compliant,
            no_console_count: tally.no_console,
        }
    }

    /// Console users without MFA.
    pub fn non_compliant_count(&self) -> usize {
        self.total_accounts - self.compliant_count - self.no_console_count
    }

    /// Percentage of accounts that passed, rounded to one decimal. `0.0` for an empty run.
    pub fn compliance_rate(&self) -> f64 {
        if self.total_accounts == 0 {
            return 0.0;
        }
        let rate = self.compliant_count as f64 / self.total_accounts as f64 * 100.0;
        (rate * 10.0).round() / 10.0
    }

    pub fn compliance_rate_label(&self) -> String {
        format!("{:.1}%", self.compliance_rate())
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn start_time_rfc3339(&self) -> String {
        self.start_time.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn end_time_rfc3339(&self) -> String {
        self.end_time.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// One complete (or interrupted) audit: summary, ordered records and the
/// stamp that names every exported artifact of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRun {
    pub summary: AuditSummary,
    pub records: Vec<AuditRecord>,
    pub export_stamp: String,
    pub interrupted: bool,
}

impl AuditRun {
    pub fn new(summary: AuditSummary, records: Vec<AuditRecord>, interrupted: bool) -> Self {
        let export_stamp = export_stamp(&summary.start_time);
        Self {
            summary,
            records,
            export_stamp,
            interrupted,
        }
    }

    pub fn failing(&self) -> impl Iterator<Item = &AuditRecord> {
        self.records
            .iter()
            .filter(|r| r.verdict == ComplianceVerdict::Fail)
    }

    pub fn has_failures(&self) -> bool {
        self.failing().next().is_some()
    }
}

/// Filesystem-safe rendering of the run start: colons replaced, sub-seconds dropped.
pub fn export_stamp(start: &DateTime<Utc>) -> String {
    start.format("%Y-%m-%dT%H-%M-%S").to_string()
}
