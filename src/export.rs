//! Timestamped export of an audit run to disk.
//!
//! Both artifacts of a run share the run's export stamp so they can be
//! matched by file name: `iam_audit_<stamp>.csv` and `iam_audit_<stamp>.json`.

use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

use crate::audit::AuditRun;
use crate::reporter::{Reporter, csv::CsvReporter, json::JsonReporter};

const FILE_PREFIX: &str = "iam_audit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Csv,
    Json,
}

impl ExportKind {
    pub const ALL: [ExportKind; 2] = [ExportKind::Csv, ExportKind::Json];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportKind::Csv => "csv",
            ExportKind::Json => "json",
        }
    }
}

impl std::fmt::Display for ExportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension().to_uppercase())
    }
}

#[derive(Error, Debug)]
#[error("Failed to write {kind} export to {}", .path.display())]
pub struct ExportError {
    pub kind: ExportKind,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

pub fn export_file_name(stamp: &str, kind: ExportKind) -> String {
    format!("{}_{}.{}", FILE_PREFIX, stamp, kind.extension())
}

/// Render the byte content of one export.
pub fn render(run: &AuditRun, kind: ExportKind) -> io::Result<String> {
    match kind {
        ExportKind::Csv => Ok(CsvReporter::new().report(run)),
        ExportKind::Json => JsonReporter::new().render(run).map_err(io::Error::from),
    }
}

/// Result of attempting every export of a run.
#[derive(Debug, Default)]
pub struct ExportOutcome {
    pub written: Vec<PathBuf>,
    pub errors: Vec<ExportError>,
}

impl ExportOutcome {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ExportWriter {
    output_dir: PathBuf,
}

impl ExportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn path_for(&self, run: &AuditRun, kind: ExportKind) -> PathBuf {
        self.output_dir
            .join(export_file_name(&run.export_stamp, kind))
    }

    pub fn write(&self, run: &AuditRun, kind: ExportKind) -> Result<PathBuf, ExportError> {
        let path = self.path_for(run, kind);
        let wrap = |source| ExportError {
            kind,
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.output_dir).map_err(wrap)?;
        let content = render(run, kind).map_err(wrap)?;
        fs::write(&path, content).map_err(wrap)?;

        debug!(path = %path.display(), %kind, "Export written");
        Ok(path)
    }

    /// Attempt every export; one failing never stops the other.
    pub fn write_all(&self, run: &AuditRun) -> ExportOutcome {
        let mut outcome = ExportOutcome::default();
        for kind in ExportKind::ALL {
            match self.write(run, kind) {
                Ok(path) => outcome.written.push(path),
                Err(e) => outcome.errors.push(e),
            }
        }
        info!(
            written = outcome.written.len(),
            failed = outcome.errors.len(),
            "Export finished"
        );
        outcome
    }
}
