//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use exchange_rates::ProviderConfig;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub exchange_api_url: String,
    pub exchange_api_key: String,
    pub exchange_api_timeout: Duration,
}

/// Output format of the fmt log layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }

    /// Reads `LOG_FORMAT`; anything but `json` means text.
    pub fn from_env() -> Self {
        Self::parse(env::var("LOG_FORMAT").ok().as_deref())
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("PORT must be a valid port number: {e}"))?;

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let exchange_api_url = lookup("EXCHANGE_API_URL")
            .unwrap_or_else(|| ProviderConfig::DEFAULT_BASE_URL.to_string());

        let exchange_api_key = lookup("EXCHANGE_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("EXCHANGE_API_KEY environment variable is required"))?;

        let exchange_api_timeout = match lookup("EXCHANGE_API_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse::<u64>().map_err(|e| {
                anyhow::anyhow!("EXCHANGE_API_TIMEOUT_SECS must be a whole number of seconds: {e}")
            })?),
            None => ProviderConfig::DEFAULT_TIMEOUT,
        };

        Ok(Self {
            port,
            database_url,
            exchange_api_url,
            exchange_api_key,
            exchange_api_timeout,
        })
    }

    /// Settings for the rate provider client.
    pub fn provider(&self) -> ProviderConfig {
        ProviderConfig::new(&self.exchange_api_url, &self.exchange_api_key)
            .with_timeout(self.exchange_api_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[
            ("DATABASE_URL", "sqlite://data/conversions.db"),
            ("EXCHANGE_API_KEY", "abc123"),
        ])
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.exchange_api_url, ProviderConfig::DEFAULT_BASE_URL);
        assert_eq!(config.exchange_api_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/converter"),
            ("EXCHANGE_API_URL", "http://localhost:9000/v6"),
            ("EXCHANGE_API_KEY", "abc123"),
            ("EXCHANGE_API_TIMEOUT_SECS", "3"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.exchange_api_url, "http://localhost:9000/v6");
        assert_eq!(config.provider().timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_log_format() {
        assert_eq!(LogFormat::parse(Some("JSON")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some(" json ")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some("pretty")), LogFormat::Text);
        assert_eq!(LogFormat::parse(None), LogFormat::Text);
    }

    #[test]
    fn test_required_values() {
        let err = load(&[("EXCHANGE_API_KEY", "abc123")]).err().unwrap();
        assert!(err.to_string().contains("DATABASE_URL"));

        let err = load(&[("DATABASE_URL", "sqlite::memory:"), ("EXCHANGE_API_KEY", " ")])
            .err()
            .unwrap();
        assert!(err.to_string().contains("EXCHANGE_API_KEY"));
    }

    #[test]
    fn test_invalid_numbers() {
        let base = [
            ("DATABASE_URL", "sqlite::memory:"),
            ("EXCHANGE_API_KEY", "abc123"),
        ];

        let mut vars = base.to_vec();
        vars.push(("PORT", "not-a-port"));
        assert!(load(&vars).is_err());

        let mut vars = base.to_vec();
        vars.push(("EXCHANGE_API_TIMEOUT_SECS", "-1"));
        assert!(load(&vars).is_err());
    }
}
