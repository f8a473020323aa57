#[cfg(test)]
pub mod fixtures {
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::audit::{AuditRecord, AuditRun, AuditSummary, Tally};
    use crate::provider::{
        Account, ConsoleProfileLookup, IdentityProvider, LoginProfile, MfaDevice, ProviderError,
    };

    pub fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 25, 12, 0, 0).unwrap()
    }

    /// Summary over `records` with a fixed 1.5 second pass.
    pub fn summary_from(records: &[AuditRecord]) -> AuditSummary {
        let start = fixed_time();
        AuditSummary::new(
            Tally::from_records(records),
            start,
            start + chrono::Duration::milliseconds(1500),
            Duration::from_millis(1500),
        )
    }

    pub fn create_test_run(records: Vec<AuditRecord>) -> AuditRun {
        AuditRun::new(summary_from(&records), records, false)
    }

    /// Pass, fail and info, one of each.
    pub fn mixed_records() -> Vec<AuditRecord> {
        vec![
            AuditRecord::new("alice", true, 2),
            AuditRecord::new("bob", true, 0),
            AuditRecord::new("deploy-bot", false, 0),
        ]
    }

    #[derive(Debug, Clone)]
    pub struct StubAccount {
        pub name: String,
        pub console_access: bool,
        pub mfa_devices: usize,
        pub console_error: Option<String>,
        pub mfa_error: Option<String>,
        pub delay: Option<Duration>,
        pub console_delay: Option<Duration>,
    }

    impl StubAccount {
        pub fn console(name: &str, mfa_devices: usize) -> Self {
            Self {
                name: name.to_string(),
                console_access: true,
                mfa_devices,
                console_error: None,
                mfa_error: None,
                delay: None,
                console_delay: None,
            }
        }

        pub fn programmatic(name: &str) -> Self {
            Self {
                console_access: false,
                ..Self::console(name, 0)
            }
        }

        pub fn with_console_error(mut self, message: &str) -> Self {
            self.console_error = Some(message.to_string());
            self
        }

        pub fn with_mfa_error(mut self, message: &str) -> Self {
            self.mfa_error = Some(message.to_string());
            self
        }

        /// Delay applied to the MFA device lookup.
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        /// Delay applied to the console login profile lookup.
        pub fn with_console_delay(mut self, delay: Duration) -> Self {
            self.console_delay = Some(delay);
            self
        }
    }

    #[derive(Debug, Default, Clone)]
    pub struct StubCalls {
        pub mfa: Vec<String>,
        pub console: Vec<String>,
    }

    /// Scripted in-memory provider that records every lookup it serves.
    #[derive(Debug, Default)]
    pub struct StubProvider {
        accounts: Vec<StubAccount>,
        list_error: Option<String>,
        calls: Mutex<StubCalls>,
    }

    impl StubProvider {
        pub fn new(accounts: Vec<StubAccount>) -> Self {
            Self {
                accounts,
                ..Self::default()
            }
        }

        pub fn with_list_error(mut self, message: &str) -> Self {
            self.list_error = Some(message.to_string());
            self
        }

        pub fn calls(&self) -> StubCalls {
            self.calls.lock().unwrap().clone()
        }

        fn find(&self, name: &str) -> Option<&StubAccount> {
            self.accounts.iter().find(|a| a.name == name)
        }
    }

    impl IdentityProvider for StubProvider {
        async fn list_accounts(&self) -> Result<Vec<Account>, ProviderError> {
            if let Some(message) = &self.list_error {
                return Err(ProviderError::service("ListUsers", message.clone()));
            }
            Ok(self.accounts.iter().map(|a| Account::new(&a.name)).collect())
        }

        async fn list_mfa_devices(
            &self,
            account_name: &str,
        ) -> Result<Vec<MfaDevice>, ProviderError> {
            self.calls.lock().unwrap().mfa.push(account_name.to_string());
            let account = self
                .find(account_name)
                .ok_or_else(|| ProviderError::service("ListMFADevices", "NoSuchEntity"))?;
            if let Some(delay) = account.delay {
                tokio::time::sleep(delay).await;
            }
            if let Some(message) = &account.mfa_error {
                return Err(ProviderError::service("ListMFADevices", message.clone()));
            }
            Ok((0..account.mfa_devices)
                .map(|i| MfaDevice {
                    serial_number: format!("{}-{}", account_name, i),
                })
                .collect())
        }

        async fn get_console_login_profile(&self, account_name: &str) -> ConsoleProfileLookup {
            self.calls
                .lock()
                .unwrap()
                .console
                .push(account_name.to_string());
            let Some(account) = self.find(account_name) else {
                return ConsoleProfileLookup::NotFound;
            };
            if let Some(delay) = account.console_delay {
                tokio::time::sleep(delay).await;
            }
            match &account.console_error {
                Some(message) => ConsoleProfileLookup::Failed(ProviderError::service(
                    "GetLoginProfile",
                    message.clone(),
                )),
                None if account.console_access => ConsoleProfileLookup::Found(LoginProfile {
                    account_name: account_name.to_string(),
                }),
                None => ConsoleProfileLookup::NotFound,
            }
        }
    }
}
