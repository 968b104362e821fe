//! Configuration management for the backend client
//!
//! Values are looked up through a [`ConfigProvider`]. The default provider
//! reads environment variables prefixed with `FIRST_AID_`, so
//! `backend_url` becomes `FIRST_AID_BACKEND_URL`.

use std::collections::HashMap;
use std::env;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, ServiceError};
use crate::services::first_aid::AgeGroup;
use crate::util::parse_duration;

/// Default backend address
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Base trait for configuration providers
pub trait ConfigProvider: Send + Sync {
    /// Get a string configuration value
    fn get_string(&self, key: &str) -> Result<String>;
}

/// Extension methods for configuration providers
pub trait ConfigProviderExt: ConfigProvider {
    /// Get a duration value such as "30s" or "250ms"
    fn get_duration(&self, key: &str) -> Result<Duration> {
        let value = self.get_string(key)?;
        parse_duration(&value).ok_or_else(|| {
            ServiceError::configuration(format!("Invalid duration for key {}: {}", key, value))
        })
    }

    /// Get a string configuration value with a default
    fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|_| default.to_string())
    }

    /// Get a duration with a default, failing only when the key is present but malformed
    fn get_duration_or(&self, key: &str, default: Duration) -> Result<Duration> {
        match self.get_string(key) {
            Ok(_) => self.get_duration(key),
            Err(_) => Ok(default),
        }
    }
}

impl<T: ConfigProvider + ?Sized> ConfigProviderExt for T {}

/// Environment variable based configuration provider
#[derive(Debug, Clone, Default)]
pub struct EnvConfigProvider {
    /// Optional prefix for environment variables
    prefix: Option<String>,

    /// Optional namespace inserted after the prefix
    namespace: Option<String>,
}

impl EnvConfigProvider {
    /// Create a new environment variable config provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a prefix for environment variables
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set a namespace for environment variables
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Format a configuration key as an environment variable
    pub(crate) fn format_key(&self, key: &str) -> String {
        let mut env_key = String::new();

        if let Some(ref prefix) = self.prefix {
            env_key.push_str(prefix);
            env_key.push('_');
        }

        if let Some(ref namespace) = self.namespace {
            env_key.push_str(namespace);
            env_key.push('_');
        }

        env_key.push_str(
            &key.to_uppercase()
                .replace(|c: char| !c.is_ascii_alphanumeric(), "_"),
        );

        env_key
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        let env_key = self.format_key(key);

        env::var(&env_key).map_err(|e| match e {
            env::VarError::NotPresent => {
                ServiceError::configuration(format!("Environment variable not set: {}", env_key))
            }
            env::VarError::NotUnicode(_) => ServiceError::configuration(format!(
                "Environment variable is not valid unicode: {}",
                env_key
            )),
        })
    }
}

/// In-memory config provider for testing or static configuration
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigProvider {
    values: HashMap<String, String>,
}

impl MemoryConfigProvider {
    /// Create a new empty memory config provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory config provider with initial values
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Set a configuration value
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: ToString,
    {
        self.values.insert(key.into(), value.to_string());
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| ServiceError::configuration(format!("Configuration key not found: {}", key)))
    }
}

/// A composite config provider that tries multiple providers in order
#[derive(Default)]
pub struct CompositeConfigProvider {
    providers: Vec<Box<dyn ConfigProvider>>,
}

impl CompositeConfigProvider {
    /// Create a new composite config provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider to the end of the chain
    pub fn add_provider(&mut self, provider: impl ConfigProvider + 'static) {
        self.providers.push(Box::new(provider));
    }

    /// Builder-style variant of [`add_provider`](Self::add_provider)
    pub fn with_provider(mut self, provider: impl ConfigProvider + 'static) -> Self {
        self.add_provider(provider);
        self
    }
}

impl ConfigProvider for CompositeConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        for provider in &self.providers {
            if let Ok(value) = provider.get_string(key) {
                return Ok(value);
            }
        }

        Err(ServiceError::configuration(format!(
            "Configuration key not found in any provider: {}",
            key
        )))
    }
}

/// Global default configuration provider
pub static DEFAULT_PROVIDER: Lazy<Arc<EnvConfigProvider>> =
    Lazy::new(|| Arc::new(EnvConfigProvider::new().with_prefix("FIRST_AID")));

/// Trait for service-specific configuration
pub trait ServiceConfig: Debug + Send + Sync {
    /// Validate this configuration
    fn validate(&self) -> Result<()>;
}

/// Configuration for the first-aid backend client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the analysis backend
    pub backend_url: String,

    /// Timeout for image analysis, guidance generation and transcription
    #[serde(with = "duration_secs")]
    pub analysis_timeout: Duration,

    /// Timeout for emergency, prevention and voice text lookups
    #[serde(with = "duration_secs")]
    pub lookup_timeout: Duration,

    /// Timeout for the health probe
    #[serde(with = "duration_secs")]
    pub health_timeout: Duration,

    /// Age group sent with guidance requests that do not pick one
    pub default_age_group: AgeGroup,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            analysis_timeout: Duration::from_secs(30),
            lookup_timeout: Duration::from_secs(10),
            health_timeout: Duration::from_secs(5),
            default_age_group: AgeGroup::Adult,
        }
    }
}

impl BackendConfig {
    /// Load configuration from a config provider
    pub fn from_provider<P: ConfigProvider + ?Sized>(provider: &P) -> Result<Self> {
        let defaults = Self::default();

        let backend_url = provider
            .get_string_or("backend_url", DEFAULT_BACKEND_URL)
            .trim()
            .trim_end_matches('/')
            .to_string();
        let analysis_timeout = provider.get_duration_or("analysis_timeout", defaults.analysis_timeout)?;
        let lookup_timeout = provider.get_duration_or("lookup_timeout", defaults.lookup_timeout)?;
        let health_timeout = provider.get_duration_or("health_timeout", defaults.health_timeout)?;
        let default_age_group = match provider.get_string("default_age_group") {
            Ok(raw) => raw.parse::<AgeGroup>()?,
            Err(_) => defaults.default_age_group,
        };

        let config = Self {
            backend_url,
            analysis_timeout,
            lookup_timeout,
            health_timeout,
            default_age_group,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `FIRST_AID_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_provider(&**DEFAULT_PROVIDER)
    }

    /// Replace the backend URL
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

impl ServiceConfig for BackendConfig {
    fn validate(&self) -> Result<()> {
        if self.backend_url.is_empty() {
            return Err(ServiceError::configuration("Backend URL is required"));
        }

        let url = Url::parse(&self.backend_url).map_err(|e| {
            ServiceError::configuration(format!("Invalid backend URL {}: {}", self.backend_url, e))
        })?;

        // "localhost:8000" parses with "localhost" as its scheme
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(ServiceError::configuration(format!(
                "Backend URL must start with http:// or https://: {}",
                self.backend_url
            )));
        }

        for (name, timeout) in [
            ("analysis_timeout", self.analysis_timeout),
            ("lookup_timeout", self.lookup_timeout),
            ("health_timeout", self.health_timeout),
        ] {
            if timeout.is_zero() {
                return Err(ServiceError::configuration(format!("{} must be greater than zero", name)));
            }
        }

        Ok(())
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_key_format() {
        let provider = EnvConfigProvider::new()
            .with_prefix("FIRST_AID")
            .with_namespace("TEST");

        assert_eq!(provider.format_key("backend_url"), "FIRST_AID_TEST_BACKEND_URL");
        assert_eq!(provider.format_key("lookup-timeout"), "FIRST_AID_TEST_LOOKUP_TIMEOUT");
    }
}
