use thiserror::Error;

use crate::config::ConfigError;
use crate::provider::ProviderError;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Failed to list accounts")]
    ListAccounts(#[source] ProviderError),

    #[error("Lookup failed for account '{account}'")]
    Provider {
        account: String,
        #[source]
        source: ProviderError,
    },

    #[error("Configuration error")]
    Config(#[from] ConfigError),
}

impl AuditError {
    pub fn provider(account: impl Into<String>, source: ProviderError) -> Self {
        Self::Provider {
            account: account.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;
