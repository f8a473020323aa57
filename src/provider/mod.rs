//! Identity provider gateway.
//!
//! The auditor only depends on [`IdentityProvider`]; the AWS IAM client and
//! the offline JSON inventory are interchangeable implementations.

pub mod aws;
mod error;
pub mod inventory;

pub use aws::AwsIamProvider;
pub use error::ProviderError;
pub use inventory::InventoryProvider;

use serde::{Deserialize, Serialize};
use std::future::Future;

/// An identity as enumerated by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
}

impl Account {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An enrolled MFA device. Only its presence matters to the audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MfaDevice {
    pub serial_number: String,
}

/// Interactive console login profile of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginProfile {
    pub account_name: String,
}

/// Result of looking up a console login profile.
///
/// `NotFound` is the only definitive "no console access"; anything that went
/// wrong on the way is `Failed` and must not be read as absence.
#[derive(Debug)]
pub enum ConsoleProfileLookup {
    Found(LoginProfile),
    NotFound,
    Failed(ProviderError),
}

pub trait IdentityProvider {
    /// Enumerate accounts in provider order.
    fn list_accounts(&self) -> impl Future<Output = Result<Vec<Account>, ProviderError>> + Send;

    /// MFA devices enrolled for `account_name`; empty means no MFA.
    fn list_mfa_devices(
        &self,
        account_name: &str,
    ) -> impl Future<Output = Result<Vec<MfaDevice>, ProviderError>> + Send;

    fn get_console_login_profile(
        &self,
        account_name: &str,
    ) -> impl Future<Output = ConsoleProfileLookup> + Send;
}
