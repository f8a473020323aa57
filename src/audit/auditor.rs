//! Drives one audit pass over the identity provider.

use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::record::{AuditRecord, AuditRun, AuditSummary, Tally};
use crate::error::{AuditError, Result};
use crate::provider::{Account, ConsoleProfileLookup, IdentityProvider, ProviderError};
use crate::reporter::progress::AuditProgress;

/// Knobs for a single pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditOptions {
    /// Accounts looked up at the same time. `1` is strictly sequential.
    pub concurrency: usize,
    /// Upper bound for each individual provider call.
    pub lookup_timeout: Option<Duration>,
    /// Treat a failed console profile lookup as "no console access".
    pub lenient_console: bool,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            lookup_timeout: None,
            lenient_console: false,
        }
    }
}

pub struct Auditor<P> {
    provider: P,
    options: AuditOptions,
}

impl<P: IdentityProvider> Auditor<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            options: AuditOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AuditOptions) -> Self {
        self.options = options;
        self
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        let accounts = self
            .bounded("ListUsers", self.provider.list_accounts())
            .await
            .map_err(AuditError::ListAccounts)?;
        if accounts.is_empty() {
            warn!("Identity provider returned no accounts");
        }
        debug!(count = accounts.len(), "Enumerated accounts");
        Ok(accounts)
    }

    /// Audit every account in the given order.
    pub async fn run(&self, accounts: &[Account], progress: &AuditProgress) -> Result<AuditRun> {
        self.run_until(accounts, progress, std::future::pending())
            .await
    }

    /// Audit accounts until done or until `shutdown` resolves.
    ///
    /// An interrupted pass still yields a run whose counts match exactly the
    /// records collected before the interruption.
    pub async fn run_until<F>(
        &self,
        accounts: &[Account],
        progress: &AuditProgress,
        shutdown: F,
    ) -> Result<AuditRun>
    where
        F: Future<Output = ()>,
    {
        let start_time = Utc::now();
        let started = Instant::now();
        let mut records = Vec::with_capacity(accounts.len());
        let mut tally = Tally::default();
        let mut interrupted = false;

        // `buffered` yields in input order whatever order lookups finish in.
        let lookups = stream::iter(accounts)
            .map(|account| self.inspect(account))
            .buffered(self.options.concurrency.max(1));
        tokio::pin!(lookups);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    warn!(
                        processed = records.len(),
                        total = accounts.len(),
                        "Audit interrupted"
                    );
                    interrupted = true;
                    break;
                }
                next = lookups.next() => match next {
                    Some(Ok(record)) => {
                        tally.record(record.verdict);
                        progress.record(&record);
                        records.push(record);
                    }
                    Some(Err(e)) => {
                        progress.finish();
                        return Err(e);
                    }
                    None => break,
                },
            }
        }

        progress.finish();
        let summary = AuditSummary::new(tally, start_time, Utc::now(), started.elapsed());
        info!(
            total = summary.total_accounts,
            compliant = summary.compliant_count,
            no_console = summary.no_console_count,
            non_compliant = summary.non_compliant_count(),
            elapsed_secs = summary.elapsed_seconds(),
            "Audit completed"
        );
        Ok(AuditRun::new(summary, records, interrupted))
    }

    async fn inspect(&self, account: &Account) -> Result<AuditRecord> {
        info!(account = %account.name, "Checking account");

        let devices = self
            .bounded(
                "ListMFADevices",
                self.provider.list_mfa_devices(&account.name),
            )
            .await
            .map_err(|e| AuditError::provider(&account.name, e))?;

        let has_console_access = match self.console_lookup(&account.name).await {
            ConsoleProfileLookup::Found(_) => true,
            ConsoleProfileLookup::NotFound => false,
            // A lookup that never answered says nothing about console access.
            ConsoleProfileLookup::Failed(err @ ProviderError::Timeout { .. }) => {
                return Err(AuditError::provider(&account.name, err));
            }
            ConsoleProfileLookup::Failed(err) if self.options.lenient_console => {
                warn!(
                    account = %account.name,
                    error = %err,
                    "Console profile lookup failed, treating as no console access"
                );
                false
            }
            ConsoleProfileLookup::Failed(err) => {
                return Err(AuditError::provider(&account.name, err));
            }
        };

        let record = AuditRecord::new(&account.name, has_console_access, devices.len());
        info!(
            account = %record.account_name,
            verdict = %record.verdict,
            "{}",
            record.verdict.message()
        );
        Ok(record)
    }

    async fn console_lookup(&self, account_name: &str) -> ConsoleProfileLookup {
        let lookup = self.provider.get_console_login_profile(account_name);
        match self.options.lookup_timeout {
            Some(after) => tokio::time::timeout(after, lookup)
                .await
                .unwrap_or_else(|_| {
                    ConsoleProfileLookup::Failed(ProviderError::Timeout {
                        operation: "GetLoginProfile",
                        after,
                    })
                }),
            None => lookup.await,
        }
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = std::result::Result<T, ProviderError>>,
    ) -> std::result::Result<T, ProviderError> {
        match self.options.lookup_timeout {
            Some(after) => tokio::time::timeout(after, call)
                .await
                .unwrap_or(Err(ProviderError::Timeout { operation, after })),
            None => call.await,
        }
    }
}
