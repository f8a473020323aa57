//! Configuration layer for iam-mfa-audit.
//!
//! ## Layers
//! - `types`: Configuration type definitions
//! - `loading`: File discovery and parsing
//! - `effective`: CLI + config file merging

mod effective;
mod error;
mod loading;
mod types;

pub use effective::{EffectiveConfig, parse_output_format};
pub use error::ConfigError;
pub use loading::{ConfigFormat, ConfigOrigin, LoadedConfig};
pub use types::{AuditConfig, AwsConfig, Config, ExportConfig, OutputConfig};

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.audit.concurrency, 1);
        assert!(config.export.enabled);
        assert!(!config.audit.lenient_console);
        assert!(config.aws.profile.is_none());
    }

    #[test]
    fn test_load_yaml_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".iam-audit.yaml");
        fs::write(
            &path,
            r#"
audit:
  concurrency: 8
  lenient_console: true
export:
  output_dir: reports
aws:
  region: us-east-1
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.audit.concurrency, 8);
        assert!(config.audit.lenient_console);
        assert!(config.export.enabled);
        assert_eq!(config.export.output_dir, Some(PathBuf::from("reports")));
        assert_eq!(config.aws.region.as_deref(), Some("us-east-1"));
    }

    #[test]
    fn test_load_json_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("audit.json");
        fs::write(&path, r#"{"output": {"strict": true, "format": "json"}}"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(config.output.strict);
        assert_eq!(config.output.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_load_toml_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("audit.toml");
        fs::write(
            &path,
            r#"
[audit]
timeout_secs = 20

[export]
enabled = false
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.audit.timeout_secs, Some(20));
        assert!(!config.export.enabled);
    }

    #[test]
    fn test_unsupported_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("audit.ini");
        fs::write(&path, "concurrency=1").unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Config::from_file(Path::new("/nonexistent/.iam-audit.yaml")),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_load_discovers_project_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".iam-audit.toml"), "[audit]\nconcurrency = 3\n").unwrap();

        let loaded = Config::discover(Some(dir.path()));
        assert_eq!(loaded.config.audit.concurrency, 3);
        assert_eq!(
            loaded.origin,
            ConfigOrigin::Project(dir.path().join(".iam-audit.toml"))
        );
        assert!(loaded.skipped.is_empty());
    }

    #[test]
    fn test_load_skips_broken_project_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".iam-audit.yaml"), "audit: [not, a, map").unwrap();
        fs::write(dir.path().join(".iam-audit.json"), r#"{"audit": {"concurrency": 5}}"#).unwrap();

        let loaded = Config::discover(Some(dir.path()));
        assert_eq!(loaded.config.audit.concurrency, 5);
        assert_eq!(loaded.skipped.len(), 1);
        assert!(matches!(
            &loaded.skipped[0],
            ConfigError::Parse { format: ConfigFormat::Yaml, .. }
        ));
    }

    #[test]
    fn test_parse_error_names_format_and_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("audit.toml");
        fs::write(&path, "[audit\n").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Failed to parse TOML config {}", path.display())
        );
    }

    #[test]
    fn test_resolve_explicit_file_wins_over_discovery() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".iam-audit.yaml"), "audit:\n  concurrency: 2\n").unwrap();
        let explicit = dir.path().join("ci.json");
        fs::write(&explicit, r#"{"audit": {"concurrency": 6}}"#).unwrap();

        let loaded = Config::resolve(Some(&explicit), Some(dir.path())).unwrap();
        assert_eq!(loaded.config.audit.concurrency, 6);
        assert_eq!(loaded.origin, ConfigOrigin::Explicit(explicit));
    }

    #[test]
    fn test_resolve_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = Config::resolve(Some(&dir.path().join("missing.yaml")), Some(dir.path()));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.YML")), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.toml")), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.ini")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("noext")), None);
    }
}
