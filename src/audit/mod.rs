//! MFA compliance model: classification, per-account records and the audit pass.

pub mod auditor;
pub mod record;
pub mod verdict;

pub use auditor::{AuditOptions, Auditor};
pub use record::{AuditRecord, AuditRun, AuditSummary, Tally, export_stamp};
pub use verdict::{ComplianceVerdict, classify};
