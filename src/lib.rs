pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod handlers;
pub mod provider;
pub mod reporter;
pub mod telemetry;

#[cfg(test)]
pub mod test_utils;

pub use audit::{
    AuditOptions, AuditRecord, AuditRun, AuditSummary, Auditor, ComplianceVerdict, classify,
};
pub use cli::{Cli, OutputFormat};
pub use config::{Config, ConfigError, EffectiveConfig};
pub use error::{AuditError, Result};
pub use export::{ExportError, ExportKind, ExportOutcome, ExportWriter};
pub use provider::{
    Account, AwsIamProvider, ConsoleProfileLookup, IdentityProvider, InventoryProvider,
    ProviderError,
};
pub use reporter::{
    Reporter, csv::CsvReporter, json::JsonReporter, terminal::TerminalReporter,
    terminal::format_summary,
};
