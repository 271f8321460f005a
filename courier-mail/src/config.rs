//! Provider configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::{MailError, Result};

/// Environment variable prefix used by [`ProviderConfig::from_env`].
pub const ENV_PREFIX: &str = "COURIER";

/// Supported email providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Amazon Simple Email Service.
    AmazonSes,
}

impl Provider {
    /// Every supported provider.
    pub const ALL: [Provider; 1] = [Provider::AmazonSes];

    /// The configuration name of the provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::AmazonSes => "AmazonSES",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = MailError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|provider| provider.as_str() == s)
            .ok_or_else(|| MailError::UnsupportedProvider(s.to_string()))
    }
}

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// JSON document.
    Json,
    /// TOML document.
    Toml,
}

impl FileFormat {
    /// Detect the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }
}

/// Transport configuration.
///
/// Every field is optional so that a partially filled configuration still
/// loads; [`TransportFactory::new`](crate::TransportFactory::new) decides
/// what is actually required for the selected provider.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name, e.g. `"AmazonSES"`.
    #[serde(default)]
    pub service: Option<String>,
    /// Provider access key.
    #[serde(default)]
    pub access_key: Option<String>,
    /// Provider secret key.
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Provider region, where the provider has one.
    #[serde(default)]
    pub region: Option<String>,
}

impl ProviderConfig {
    /// Create a configuration for the given provider name.
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: Some(service.into()),
            ..Self::default()
        }
    }

    /// Set credentials.
    pub fn credentials(mut self, access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set the region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Resolve the configured provider.
    pub fn provider(&self) -> Result<Provider> {
        match self.service.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(service) => service.parse(),
            None => Err(MailError::UnsupportedProvider("<unset>".to_string())),
        }
    }

    /// Access key, if set and not blank.
    pub fn access_key(&self) -> Option<&str> {
        non_blank(&self.access_key)
    }

    /// Secret key, if set and not blank.
    pub fn secret_key(&self) -> Option<&str> {
        non_blank(&self.secret_key)
    }

    /// Region, if set and not blank.
    pub fn region_name(&self) -> Option<&str> {
        non_blank(&self.region)
    }

    /// Load configuration from a JSON or TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(FileFormat::from_extension)
            .ok_or_else(|| {
                MailError::Config(format!("Unsupported config format: {}", path.display()))
            })?;

        let content = std::fs::read_to_string(path)
            .map_err(|e| MailError::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        Self::parse(&content, format)
    }

    /// Parse configuration from a string.
    pub fn parse(content: &str, format: FileFormat) -> Result<Self> {
        match format {
            FileFormat::Json => Ok(serde_json::from_str(content)?),
            FileFormat::Toml => Ok(toml::from_str(content)?),
        }
    }

    /// Load configuration from `COURIER_*` environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_vars(std::env::vars())
    }

    /// Build configuration from `COURIER_*` key/value pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::default();

        for (key, value) in vars {
            let Some(name) = key
                .as_ref()
                .strip_prefix(ENV_PREFIX)
                .and_then(|rest| rest.strip_prefix('_'))
            else {
                continue;
            };

            let slot = match name.to_uppercase().as_str() {
                "SERVICE" => &mut config.service,
                "ACCESS_KEY" => &mut config.access_key,
                "SECRET_KEY" => &mut config.secret_key,
                "REGION" => &mut config.region,
                _ => continue,
            };
            *slot = Some(value.into());
        }

        config
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("service", &self.service)
            .field("access_key", &self.access_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("region", &self.region)
            .finish()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
