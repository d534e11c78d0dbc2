use serde::Deserialize;
use std::env;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8081";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Gemini API key not found: set GEMINI_API_KEY or provider.api_key")]
    MissingApiKey,
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub provider: ProviderConfig,
    pub bind_addr: String,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        // Root .env first, then the local one
        let skip_root_env = env::var("SKIP_ROOT_ENV").is_ok();
        if skip_root_env {
            dotenvy::dotenv().ok();
        } else if dotenvy::from_path("../../.env").is_err() {
            dotenvy::dotenv().ok();
        }

        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // config/{env}.toml + APP__ overrides
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Self::from_settings(&settings)
    }

    fn from_settings(settings: &config::Config) -> Result<Self, ConfigError> {
        let api_key = settings
            .get_string("provider.api_key")
            .or_else(|_| env::var("GEMINI_API_KEY"))
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let model = settings
            .get_string("provider.model")
            .or_else(|_| env::var("GEMINI_MODEL"))
            .unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url = settings
            .get_string("provider.base_url")
            .or_else(|_| env::var("GEMINI_API_URL"))
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = match settings.get_int("provider.timeout_secs") {
            Ok(secs) if secs > 0 => secs as u64,
            Ok(secs) => {
                return Err(ConfigError::Invalid {
                    key: "provider.timeout_secs",
                    reason: format!("must be positive, got {}", secs),
                })
            }
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let bind_addr = settings
            .get_string("server.bind_addr")
            .or_else(|_| env::var("BIND_ADDR"))
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Ok(Config {
            provider: ProviderConfig {
                api_key,
                model,
                base_url,
                timeout_secs,
            },
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> config::Config {
        let mut builder = config::Config::builder();
        for (key, value) in pairs {
            builder = builder.set_override(*key, *value).unwrap();
        }
        builder.build().unwrap()
    }

    #[test]
    #[serial_test::serial]
    fn missing_api_key_is_fatal() {
        env::remove_var("GEMINI_API_KEY");
        let err = Config::from_settings(&settings(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    #[serial_test::serial]
    fn blank_api_key_is_fatal() {
        env::remove_var("GEMINI_API_KEY");
        let err = Config::from_settings(&settings(&[("provider.api_key", "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    #[serial_test::serial]
    fn api_key_from_env_with_defaults() {
        env::set_var("GEMINI_API_KEY", "env-key");
        env::remove_var("GEMINI_MODEL");
        env::remove_var("GEMINI_API_URL");
        env::remove_var("BIND_ADDR");

        let config = Config::from_settings(&settings(&[])).unwrap();
        assert_eq!(config.provider.api_key, "env-key");
        assert_eq!(config.provider.model, DEFAULT_MODEL);
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.provider.timeout(), Duration::from_secs(120));
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);

        env::remove_var("GEMINI_API_KEY");
    }

    #[test]
    #[serial_test::serial]
    fn settings_override_env() {
        env::set_var("GEMINI_API_KEY", "env-key");

        let config = Config::from_settings(&settings(&[
            ("provider.api_key", "file-key"),
            ("provider.model", "gemini-2.0-flash"),
            ("provider.base_url", "http://localhost:9999/"),
            ("provider.timeout_secs", "5"),
        ]))
        .unwrap();
        assert_eq!(config.provider.api_key, "file-key");
        assert_eq!(config.provider.model, "gemini-2.0-flash");
        assert_eq!(config.provider.base_url, "http://localhost:9999");
        assert_eq!(config.provider.timeout_secs, 5);

        env::remove_var("GEMINI_API_KEY");
    }

    #[test]
    #[serial_test::serial]
    fn zero_timeout_rejected() {
        let err = Config::from_settings(&settings(&[
            ("provider.api_key", "k"),
            ("provider.timeout_secs", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
