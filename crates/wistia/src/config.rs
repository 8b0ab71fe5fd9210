use crate::prelude::*;
use crate::{ErrorKind, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_with::formats::Flexible;
use serde_with::{serde_as, DurationSeconds};
use std::time::Duration;

/// Credentials and defaults of a [`Client`](crate::Client).
///
/// See <https://wistia.com/support/developers/data-api#authentication>
#[serde_as]
#[derive(Clone, Deserialize, derivative::Derivative)]
#[derivative(Debug)]
pub struct Config {
    #[serde(default = "default_account")]
    pub(crate) account: String,

    #[derivative(Debug = "ignore")]
    pub(crate) api_password: String,

    /// How far in the future expiring tokens expire by default
    #[serde_as(as = "DurationSeconds<u64, Flexible>")]
    #[serde(default = "default_expiry_delta")]
    pub(crate) expiry_delta: Duration,
}

fn default_account() -> String {
    "api".to_owned()
}

fn default_expiry_delta() -> Duration {
    Duration::from_secs(12 * 60 * 60)
}

impl Config {
    /// Creates a config with the default account (`api`) and a 12 hours
    /// token expiry delta. The password must not be blank.
    pub fn new(api_password: impl Into<String>) -> Result<Self> {
        Self {
            account: default_account(),
            api_password: api_password.into(),
            expiry_delta: default_expiry_delta(),
        }
        .validate()
    }

    /// Loads the config from environment variables with the given prefix.
    /// For example, with the `WISTIA_` prefix the following are read:
    ///
    /// - `WISTIA_API_PASSWORD` (required)
    /// - `WISTIA_ACCOUNT` (default: `api`)
    /// - `WISTIA_EXPIRY_DELTA` in seconds (default: 12 hours)
    pub fn from_env(prefix: &str) -> Result<Self> {
        from_env::<Self>(prefix)?.validate()
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = account.into();
        self
    }

    pub fn with_expiry_delta(mut self, expiry_delta: Duration) -> Self {
        self.expiry_delta = expiry_delta;
        self
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn expiry_delta(&self) -> Duration {
        self.expiry_delta
    }

    fn validate(self) -> Result<Self> {
        if self.api_password.trim().is_empty() {
            return Err(err!(ErrorKind::Config {
                message: "the API password is required, but none was provided",
            }));
        }
        Ok(self)
    }
}

pub(crate) fn from_env<T: DeserializeOwned>(prefix: &str) -> Result<T> {
    envy::prefixed(prefix)
        .from_env()
        .map_err(err_ctx!(ErrorKind::ConfigEnv))
}
