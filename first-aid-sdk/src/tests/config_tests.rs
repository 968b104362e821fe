//! Tests for configuration management functionality
//!
//! These tests verify the config providers and backend config loading.

#[cfg(test)]
mod tests {
    use std::env;
    use std::time::Duration;

    use crate::config::{
        BackendConfig, CompositeConfigProvider, ConfigProvider, ConfigProviderExt,
        EnvConfigProvider, MemoryConfigProvider, ServiceConfig, DEFAULT_BACKEND_URL,
    };
    use crate::services::first_aid::AgeGroup;

    #[test]
    fn test_memory_config_provider() {
        let mut provider = MemoryConfigProvider::new();
        provider.set("backend_url", "http://backend:9000");
        provider.set("lookup_timeout", "250ms");

        assert_eq!(provider.get_string("backend_url").unwrap(), "http://backend:9000");
        assert_eq!(provider.get_duration("lookup_timeout").unwrap(), Duration::from_millis(250));

        // Test default values
        assert_eq!(provider.get_string_or("missing", "default"), "default");
        assert_eq!(
            provider.get_duration_or("missing", Duration::from_secs(7)).unwrap(),
            Duration::from_secs(7)
        );

        // Test error case
        assert!(provider.get_string("missing").is_err());
        assert!(provider.get_duration("backend_url").is_err());
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = BackendConfig::from_provider(&MemoryConfigProvider::new()).unwrap();

        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.analysis_timeout, Duration::from_secs(30));
        assert_eq!(config.lookup_timeout, Duration::from_secs(10));
        assert_eq!(config.health_timeout, Duration::from_secs(5));
        assert_eq!(config.default_age_group, AgeGroup::Adult);
    }

    #[test]
    fn test_overrides() {
        let mut provider = MemoryConfigProvider::new();
        provider.set("backend_url", "https://triage.example.org/");
        provider.set("analysis_timeout", "1m");
        provider.set("lookup_timeout", "15");
        provider.set("health_timeout", "500ms");
        provider.set("default_age_group", "Child");

        let config = BackendConfig::from_provider(&provider).unwrap();

        assert_eq!(config.backend_url, "https://triage.example.org");
        assert_eq!(config.analysis_timeout, Duration::from_secs(60));
        assert_eq!(config.lookup_timeout, Duration::from_secs(15));
        assert_eq!(config.health_timeout, Duration::from_millis(500));
        assert_eq!(config.default_age_group, AgeGroup::Child);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut provider = MemoryConfigProvider::new();
        provider.set("lookup_timeout", "soon");
        assert!(BackendConfig::from_provider(&provider).is_err());

        let mut provider = MemoryConfigProvider::new();
        provider.set("health_timeout", "0s");
        assert!(BackendConfig::from_provider(&provider).is_err());

        let mut provider = MemoryConfigProvider::new();
        provider.set("backend_url", "localhost without scheme");
        assert!(BackendConfig::from_provider(&provider).is_err());

        let mut provider = MemoryConfigProvider::new();
        provider.set("default_age_group", "toddler");
        assert!(BackendConfig::from_provider(&provider).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(BackendConfig::default().validate().is_ok());

        let config = BackendConfig {
            backend_url: String::new(),
            ..BackendConfig::default()
        };
        assert!(config.validate().is_err());

        let config = BackendConfig {
            backend_url: "ftp://files.example.org".to_string(),
            ..BackendConfig::default()
        };
        assert!(config.validate().is_err());

        let config = BackendConfig {
            analysis_timeout: Duration::ZERO,
            ..BackendConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backend_url_without_scheme_is_rejected() {
        let mut provider = MemoryConfigProvider::new();
        provider.set("backend_url", "localhost:8000");

        let err = BackendConfig::from_provider(&provider).unwrap_err();
        assert!(err.to_string().contains("must start with http:// or https://"));

        let config = BackendConfig::default().with_backend_url("mailto:help@example.org");
        assert!(config.validate().is_err());

        let config = BackendConfig::default().with_backend_url("https://triage.example.org/api");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_config_provider() {
        // Set test environment variables
        env::set_var("FIRST_AID_CFGTEST_BACKEND_URL", "http://10.0.0.5:8000");
        env::set_var("FIRST_AID_CFGTEST_LOOKUP_TIMEOUT", "3s");

        let provider = EnvConfigProvider::new()
            .with_prefix("FIRST_AID")
            .with_namespace("CFGTEST");

        assert_eq!(provider.get_string("backend_url").unwrap(), "http://10.0.0.5:8000");

        let config = BackendConfig::from_provider(&provider).unwrap();
        assert_eq!(config.backend_url, "http://10.0.0.5:8000");
        assert_eq!(config.lookup_timeout, Duration::from_secs(3));
        assert_eq!(config.analysis_timeout, Duration::from_secs(30));

        // Test error case
        assert!(provider.get_string("NON_EXISTENT").is_err());

        // Clean up
        env::remove_var("FIRST_AID_CFGTEST_BACKEND_URL");
        env::remove_var("FIRST_AID_CFGTEST_LOOKUP_TIMEOUT");
    }

    #[test]
    fn test_composite_config_provider() {
        let mut overrides = MemoryConfigProvider::new();
        overrides.set("backend_url", "http://override:8000");

        let mut fallback = MemoryConfigProvider::new();
        fallback.set("backend_url", "http://fallback:8000");
        fallback.set("health_timeout", "2s");

        let provider = CompositeConfigProvider::new()
            .with_provider(overrides)
            .with_provider(fallback);

        assert_eq!(provider.get_string("backend_url").unwrap(), "http://override:8000");
        assert_eq!(provider.get_string("health_timeout").unwrap(), "2s");
        assert!(provider.get_string("missing").is_err());

        let config = BackendConfig::from_provider(&provider).unwrap();
        assert_eq!(config.backend_url, "http://override:8000");
        assert_eq!(config.health_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_age_group_parsing() {
        assert_eq!("infant".parse::<AgeGroup>().unwrap(), AgeGroup::Infant);
        assert_eq!(" ELDER ".parse::<AgeGroup>().unwrap(), AgeGroup::Elder);
        assert!("senior".parse::<AgeGroup>().is_err());
        assert_eq!(AgeGroup::default().to_string(), "adult");
    }
}
