//! Locating and parsing the audit configuration file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::ConfigError;
use super::types::Config;

/// Project file names, tried in order inside the working directory.
const PROJECT_CONFIG_FILES: &[&str] = &[
    ".iam-audit.yaml",
    ".iam-audit.yml",
    ".iam-audit.json",
    ".iam-audit.toml",
];

const GLOBAL_CONFIG_DIR: &str = "iam-mfa-audit";
const GLOBAL_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    fn parse(self, content: &str) -> Result<Config, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            Self::Yaml => serde_yaml::from_str(content)?,
            Self::Json => serde_json::from_str(content)?,
            Self::Toml => toml::from_str(content)?,
        })
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Yaml => "YAML",
            Self::Json => "JSON",
            Self::Toml => "TOML",
        })
    }
}

/// Where the configuration in use came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Named with `--config`.
    Explicit(PathBuf),
    /// Discovered in the working directory.
    Project(PathBuf),
    /// The per-user file under the platform config directory.
    Global(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) | Self::Project(path) | Self::Global(path) => {
                write!(f, "{}", path.display())
            }
            Self::Defaults => f.write_str("built-in defaults"),
        }
    }
}

/// Outcome of configuration lookup.
///
/// Discovered files that fail to load are skipped rather than fatal. Their
/// errors are kept so the caller can report them once logging is set up.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    pub origin: ConfigOrigin,
    pub skipped: Vec<ConfigError>,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        format.parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            format,
            source,
        })
    }

    /// Resolve the configuration for one invocation.
    ///
    /// An explicit file must load. Otherwise the first loadable file among
    /// the project candidates and then the global file wins.
    pub fn resolve(
        explicit: Option<&Path>,
        project_root: Option<&Path>,
    ) -> Result<LoadedConfig, ConfigError> {
        match explicit {
            Some(path) => Ok(LoadedConfig {
                config: Self::from_file(path)?,
                origin: ConfigOrigin::Explicit(path.to_path_buf()),
                skipped: Vec::new(),
            }),
            None => Ok(Self::discover(project_root)),
        }
    }

    pub fn discover(project_root: Option<&Path>) -> LoadedConfig {
        let mut skipped = Vec::new();

        for origin in candidates(project_root) {
            let (ConfigOrigin::Project(path) | ConfigOrigin::Global(path)) = &origin else {
                continue;
            };
            if !path.exists() {
                continue;
            }
            match Self::from_file(path) {
                Ok(config) => {
                    debug!(origin = %origin, "Loaded configuration");
                    return LoadedConfig {
                        config,
                        origin,
                        skipped,
                    };
                }
                Err(e) => skipped.push(e),
            }
        }

        LoadedConfig {
            config: Self::default(),
            origin: ConfigOrigin::Defaults,
            skipped,
        }
    }
}

fn candidates(project_root: Option<&Path>) -> Vec<ConfigOrigin> {
    let project = project_root.into_iter().flat_map(|root| {
        PROJECT_CONFIG_FILES
            .iter()
            .map(move |name| ConfigOrigin::Project(root.join(name)))
    });
    let global = dirs::config_dir()
        .map(|dir| ConfigOrigin::Global(dir.join(GLOBAL_CONFIG_DIR).join(GLOBAL_CONFIG_FILE)));
    project.chain(global).collect()
}
