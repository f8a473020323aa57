//! AWS IAM backed provider.

use aws_config::BehaviorVersion;
use aws_sdk_iam::Client;
use aws_sdk_iam::config::Region;
use aws_sdk_iam::error::DisplayErrorContext;
use tracing::debug;

use super::{Account, ConsoleProfileLookup, IdentityProvider, LoginProfile, MfaDevice, ProviderError};

/// Gateway over the IAM API using the ambient AWS configuration.
#[derive(Debug, Clone)]
pub struct AwsIamProvider {
    client: Client,
}

impl AwsIamProvider {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the default credential chain.
    ///
    /// `profile` and `region` only pick which ambient configuration to use.
    pub async fn from_env(profile: Option<&str>, region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }
        let config = loader.load().await;
        debug!(region = ?config.region(), "Loaded AWS configuration");
        Self::new(Client::new(&config))
    }
}

impl IdentityProvider for AwsIamProvider {
    async fn list_accounts(&self) -> Result<Vec<Account>, ProviderError> {
        let output = self
            .client
            .list_users()
            .send()
            .await
            .map_err(|e| ProviderError::service("ListUsers", DisplayErrorContext(&e).to_string()))?;

        Ok(output
            .users()
            .iter()
            .map(|user| Account::new(user.user_name()))
            .collect())
    }

    async fn list_mfa_devices(&self, account_name: &str) -> Result<Vec<MfaDevice>, ProviderError> {
        let output = self
            .client
            .list_mfa_devices()
            .user_name(account_name)
            .send()
            .await
            .map_err(|e| {
                ProviderError::service("ListMFADevices", DisplayErrorContext(&e).to_string())
            })?;

        Ok(output
            .mfa_devices()
            .iter()
            .map(|device| MfaDevice {
                serial_number: device.serial_number().to_string(),
            })
            .collect())
    }

    async fn get_console_login_profile(&self, account_name: &str) -> ConsoleProfileLookup {
        match self
            .client
            .get_login_profile()
            .user_name(account_name)
            .send()
            .await
        {
            Ok(_) => ConsoleProfileLookup::Found(LoginProfile {
                account_name: account_name.to_string(),
            }),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_no_such_entity_exception()) =>
            {
                ConsoleProfileLookup::NotFound
            }
            Err(err) => ConsoleProfileLookup::Failed(ProviderError::service(
                "GetLoginProfile",
                DisplayErrorContext(&err).to_string(),
            )),
        }
    }
}
