//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for iam-mfa-audit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Audit pass configuration.
    pub audit: AuditConfig,
    /// Export file configuration.
    pub export: ExportConfig,
    /// Console output configuration (CLI options).
    pub output: OutputConfig,
    /// AWS configuration selection.
    pub aws: AwsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Number of accounts looked up concurrently.
    pub concurrency: usize,
    /// Timeout in seconds for each provider call.
    pub timeout_secs: Option<u64>,
    /// Treat failed console profile lookups as "no console access".
    pub lenient_console: bool,
    /// Audit an offline JSON inventory instead of AWS.
    pub inventory: Option<PathBuf>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            timeout_secs: None,
            lenient_console: false,
            inventory: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Write the CSV and JSON exports.
    pub enabled: bool,
    /// Directory for export files. Defaults to the working directory.
    pub output_dir: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "terminal", "json".
    pub format: Option<String>,
    /// Exit with 1 when any console user lacks MFA.
    pub strict: bool,
    /// CI mode: non-interactive output.
    pub ci: bool,
    /// Verbose output.
    pub verbose: bool,
    /// Disable coloured output.
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsConfig {
    /// Named profile from the shared AWS config.
    pub profile: Option<String>,
    pub region: Option<String>,
}
