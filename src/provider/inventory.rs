//! Offline provider backed by a JSON inventory snapshot.
//!
//! ```json
//! {
//!   "users": [
//!     { "name": "alice", "console_access": true, "mfa_devices": ["arn:aws:iam::1:mfa/alice"] },
//!     { "name": "deploy-bot", "console_access": false },
//!     { "name": "carol", "console_access": true, "mfa_devices": 0 },
//!     { "name": "dave", "console_error": "AccessDenied" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use super::{Account, ConsoleProfileLookup, IdentityProvider, LoginProfile, MfaDevice, ProviderError};

/// MFA enrollment as written in the inventory: device serials or a bare count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MfaEntry {
    Devices(Vec<String>),
    Count(usize),
}

impl Default for MfaEntry {
    fn default() -> Self {
        MfaEntry::Count(0)
    }
}

impl MfaEntry {
    fn devices(&self, account_name: &str) -> Vec<MfaDevice> {
        match self {
            MfaEntry::Devices(serials) => serials
                .iter()
                .map(|s| MfaDevice {
                    serial_number: s.clone(),
                })
                .collect(),
            MfaEntry::Count(n) => (0..*n)
                .map(|i| MfaDevice {
                    serial_number: format!("{}-mfa-{}", account_name, i),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryUser {
    pub name: String,
    #[serde(default)]
    pub console_access: bool,
    #[serde(default)]
    pub mfa_devices: MfaEntry,
    /// Simulated failure of the console profile lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console_error: Option<String>,
    /// Simulated failure of the MFA device lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mfa_error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub users: Vec<InventoryUser>,
}

#[derive(Debug, Clone)]
pub struct InventoryProvider {
    users: Vec<InventoryUser>,
    index: HashMap<String, usize>,
}

impl InventoryProvider {
    pub fn from_users(users: Vec<InventoryUser>) -> Result<Self, ProviderError> {
        let mut seen = HashSet::new();
        for user in &users {
            if user.name.trim().is_empty() {
                return Err(ProviderError::InvalidInventory(
                    "user with empty name".to_string(),
                ));
            }
            if !seen.insert(user.name.as_str()) {
                return Err(ProviderError::InvalidInventory(format!(
                    "duplicate user '{}'",
                    user.name
                )));
            }
        }

        let index = users
            .iter()
            .enumerate()
            .map(|(i, u)| (u.name.clone(), i))
            .collect();
        Ok(Self { users, index })
    }

    pub fn from_file(path: &Path) -> Result<Self, ProviderError> {
        let content = fs::read_to_string(path).map_err(|e| ProviderError::Inventory {
            path: path.to_path_buf(),
            source: e,
        })?;
        let inventory: Inventory =
            serde_json::from_str(&content).map_err(|e| ProviderError::InventoryParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        Self::from_users(inventory.users)
    }

    fn user(&self, account_name: &str) -> Option<&InventoryUser> {
        self.index.get(account_name).map(|&i| &self.users[i])
    }
}

impl IdentityProvider for InventoryProvider {
    async fn list_accounts(&self) -> Result<Vec<Account>, ProviderError> {
        Ok(self.users.iter().map(|u| Account::new(&u.name)).collect())
    }

    async fn list_mfa_devices(&self, account_name: &str) -> Result<Vec<MfaDevice>, ProviderError> {
        let user = self.user(account_name).ok_or_else(|| {
            ProviderError::service("ListMFADevices", format!("no such user '{}'", account_name))
        })?;
        match &user.mfa_error {
            Some(message) => Err(ProviderError::service("ListMFADevices", message.clone())),
            None => Ok(user.mfa_devices.devices(account_name)),
        }
    }

    async fn get_console_login_profile(&self, account_name: &str) -> ConsoleProfileLookup {
        let Some(user) = self.user(account_name) else {
            return ConsoleProfileLookup::NotFound;
        };
        if let Some(message) = &user.console_error {
            return ConsoleProfileLookup::Failed(ProviderError::service(
                "GetLoginProfile",
                message.clone(),
            ));
        }
        if user.console_access {
            ConsoleProfileLookup::Found(LoginProfile {
                account_name: account_name.to_string(),
            })
        } else {
            ConsoleProfileLookup::NotFound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn user(name: &str, console_access: bool, mfa: usize) -> InventoryUser {
        InventoryUser {
            name: name.to_string(),
            console_access,
            mfa_devices: MfaEntry::Count(mfa),
            console_error: None,
            mfa_error: None,
        }
    }

    #[tokio::test]
    async fn test_lists_accounts_in_file_order() {
        let provider = InventoryProvider::from_users(vec![
            user("zed", true, 1),
            user("amy", false, 0),
            user("kim", true, 0),
        ])
        .unwrap();
        let names: Vec<_> = provider
            .list_accounts()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["zed", "amy", "kim"]);
    }

    #[tokio::test]
    async fn test_parses_devices_and_counts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        fs::write(
            &path,
            r#"{"users": [
                {"name": "alice", "console_access": true, "mfa_devices": ["arn:mfa/alice"]},
                {"name": "bob", "console_access": true, "mfa_devices": 2},
                {"name": "svc"}
            ]}"#,
        )
        .unwrap();

        let provider = InventoryProvider::from_file(&path).unwrap();
        let alice = provider.list_mfa_devices("alice").await.unwrap();
        assert_eq!(alice[0].serial_number, "arn:mfa/alice");
        assert_eq!(provider.list_mfa_devices("bob").await.unwrap().len(), 2);
        assert!(provider.list_mfa_devices("svc").await.unwrap().is_empty());
        assert!(matches!(
            provider.get_console_login_profile("svc").await,
            ConsoleProfileLookup::NotFound
        ));
        assert!(matches!(
            provider.get_console_login_profile("alice").await,
            ConsoleProfileLookup::Found(_)
        ));
    }

    #[tokio::test]
    async fn test_console_error_is_failed_not_absent() {
        let mut broken = user("dave", true, 0);
        broken.console_error = Some("AccessDenied".to_string());
        let provider = InventoryProvider::from_users(vec![broken]).unwrap();

        match provider.get_console_login_profile("dave").await {
            ConsoleProfileLookup::Failed(err) => assert!(err.to_string().contains("AccessDenied")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mfa_error_surfaces() {
        let mut broken = user("erin", true, 1);
        broken.mfa_error = Some("Throttling".to_string());
        let provider = InventoryProvider::from_users(vec![broken]).unwrap();
        assert!(provider.list_mfa_devices("erin").await.is_err());
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = InventoryProvider::from_users(vec![user("a", true, 0), user("a", false, 0)])
            .unwrap_err();
        assert!(err.to_string().contains("duplicate user 'a'"));
    }

    #[test]
    fn test_rejects_empty_name() {
        assert!(InventoryProvider::from_users(vec![user("  ", true, 0)]).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = InventoryProvider::from_file(Path::new("/nonexistent/users.json")).unwrap_err();
        assert!(matches!(err, ProviderError::Inventory { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        fs::write(&path, "{ not json").unwrap();
        let err = InventoryProvider::from_file(&path).unwrap_err();
        assert!(matches!(err, ProviderError::InventoryParse { .. }));
    }
}
