//! Effective configuration after merging CLI and config file.

use std::path::PathBuf;
use std::time::Duration;

use super::error::ConfigError;
use super::types::Config;
use crate::audit::AuditOptions;
use crate::cli::{Cli, OutputFormat};

/// Effective run configuration after merging CLI and config file.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    pub format: OutputFormat,
    pub strict: bool,
    pub ci: bool,
    pub verbose: bool,
    pub no_color: bool,
    pub export: bool,
    pub output_dir: PathBuf,
    pub inventory: Option<PathBuf>,
    pub aws_profile: Option<String>,
    pub aws_region: Option<String>,
    pub audit: AuditOptions,
}

impl EffectiveConfig {
    /// Merge CLI options with config file settings.
    ///
    /// - Boolean flags: CLI OR config (either can enable)
    /// - Valued options: CLI takes precedence, fallback to config, then default
    /// - `--no-export` always wins over `export.enabled`
    pub fn from_cli_and_config(cli: &Cli, config: &Config) -> Result<Self, ConfigError> {
        let format = match cli.format {
            Some(format) => format,
            None => parse_output_format(config.output.format.as_deref())?.unwrap_or_default(),
        };

        let concurrency = cli.concurrency.unwrap_or(config.audit.concurrency);
        if concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "concurrency",
                message: "must be at least 1".to_string(),
            });
        }

        let timeout_secs = cli.timeout.or(config.audit.timeout_secs);
        if timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "timeout",
                message: "must be at least 1 second".to_string(),
            });
        }

        Ok(Self {
            format,
            strict: cli.strict || config.output.strict,
            ci: cli.ci || config.output.ci,
            verbose: cli.verbose || config.output.verbose,
            no_color: cli.no_color || config.output.no_color,
            export: !cli.no_export && config.export.enabled,
            output_dir: cli
                .output_dir
                .clone()
                .or_else(|| config.export.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from(".")),
            inventory: cli
                .inventory
                .clone()
                .or_else(|| config.audit.inventory.clone()),
            aws_profile: cli.aws_profile.clone().or_else(|| config.aws.profile.clone()),
            aws_region: cli.region.clone().or_else(|| config.aws.region.clone()),
            audit: AuditOptions {
                concurrency,
                lookup_timeout: timeout_secs.map(Duration::from_secs),
                lenient_console: cli.lenient_console || config.audit.lenient_console,
            },
        })
    }
}

pub fn parse_output_format(value: Option<&str>) -> Result<Option<OutputFormat>, ConfigError> {
    match value.map(|v| v.to_lowercase()) {
        None => Ok(None),
        Some(v) => match v.as_str() {
            "terminal" => Ok(Some(OutputFormat::Terminal)),
            "json" => Ok(Some(OutputFormat::Json)),
            _ => Err(ConfigError::InvalidValue {
                field: "output.format",
                message: format!("unknown format '{}'", v),
            }),
        },
    }
}
