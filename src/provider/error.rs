//! Identity provider error types.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failure talking to (or reading) the identity provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{operation} failed: {message}")]
    Service {
        operation: &'static str,
        message: String,
    },

    #[error("{operation} timed out after {}s", .after.as_secs_f64())]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("Failed to read inventory file: {}", .path.display())]
    Inventory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse inventory file: {}", .path.display())]
    InventoryParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid inventory: {0}")]
    InvalidInventory(String),
}

impl ProviderError {
    pub fn service(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Service {
            operation,
            message: message.into(),
        }
    }
}
