//! Credential configuration loaded from the environment or JSON.

use std::path::Path;

use serde::Deserialize;

use crate::envelope::CallbackCrypto;
use crate::error::ConfigError;

pub const ENV_TOKEN: &str = "CALLBACK_TOKEN";
pub const ENV_AES_KEY: &str = "CALLBACK_AES_KEY";
pub const ENV_OWNER_KEY: &str = "CALLBACK_OWNER_KEY";

/// Raw, unvalidated callback settings as copied from the platform console.
#[derive(Clone, Deserialize)]
pub struct Config {
    pub token: String,
    #[serde(alias = "aes_key")]
    pub encoding_aes_key: String,
    /// Corp id for internal apps, suite key for third-party suites.
    #[serde(alias = "corp_id", alias = "suite_key")]
    pub owner_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            token: env_var(ENV_TOKEN)?,
            encoding_aes_key: env_var(ENV_AES_KEY)?,
            owner_key: env_var(ENV_OWNER_KEY)?,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Validate the key and build the crypto handle.
    pub fn build(&self) -> Result<CallbackCrypto, ConfigError> {
        Ok(CallbackCrypto::new(
            self.token.clone(),
            &self.encoding_aes_key,
            self.owner_key.clone(),
        )?)
    }
}

impl core::fmt::Debug for Config {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("encoding_aes_key", &"<redacted>")
            .field("owner_key", &self.owner_key)
            .finish()
    }
}

fn env_var(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}
