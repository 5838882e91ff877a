//! Demo configuration resolved from the environment.
//!
//! Every key is read once at startup. Missing required keys are collected and
//! reported together before any request reaches Marathon.
use thiserror::Error;

pub const MARATHON_API_ENV: &str = "MSS_MARATHON_API";
pub const USER_ID_ENV: &str = "MSS_USER_ID";
pub const API_ADDRESS_ENV: &str = "MSS_API_ADDRESS";
pub const STORAGE_ACCOUNT_NAME_ENV: &str = "AZURE_STORAGE_ACCOUNT_NAME";
pub const STORAGE_ACCOUNT_KEY_ENV: &str = "AZURE_STORAGE_ACCOUNT_KEY";
pub const STORAGE_QUEUE_NAME_ENV: &str = "AZURE_STORAGE_QUEUE_NAME";

/// Microscaling API used when `MSS_API_ADDRESS` is unset.
pub const DEFAULT_API_ADDRESS: &str = "app.microscaling.com";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", keys.join(", "))]
    Missing { keys: Vec<&'static str> },
}

/// Azure storage queue the producer fills and the consumers drain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageQueue {
    pub account_name: String,
    pub account_key: String,
    pub queue_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// Marathon base URL, e.g. `http://10.0.0.5:8080`.
    pub marathon_api: String,
    pub user_id: String,
    pub api_address: String,
    pub storage: StorageQueue,
}

impl DemoConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut required = |key: &'static str| {
            let value = non_empty(lookup(key));
            if value.is_none() {
                missing.push(key);
            }
            value.unwrap_or_default()
        };

        let marathon_api = required(MARATHON_API_ENV);
        let user_id = required(USER_ID_ENV);
        let account_name = required(STORAGE_ACCOUNT_NAME_ENV);
        let account_key = required(STORAGE_ACCOUNT_KEY_ENV);
        let queue_name = required(STORAGE_QUEUE_NAME_ENV);

        if !missing.is_empty() {
            return Err(ConfigError::Missing { keys: missing });
        }

        let api_address = non_empty(lookup(API_ADDRESS_ENV))
            .unwrap_or_else(|| DEFAULT_API_ADDRESS.to_string());

        Ok(Self {
            marathon_api,
            user_id,
            api_address,
            storage: StorageQueue {
                account_name,
                account_key,
                queue_name,
            },
        })
    }

    /// Only the Marathon address is needed for read-only and teardown commands.
    pub fn marathon_api_from_env() -> Result<String, ConfigError> {
        Self::marathon_api_from_lookup(|key| std::env::var(key).ok())
    }

    pub fn marathon_api_from_lookup<F>(lookup: F) -> Result<String, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        non_empty(lookup(MARATHON_API_ENV)).ok_or_else(|| ConfigError::Missing {
            keys: vec![MARATHON_API_ENV],
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
