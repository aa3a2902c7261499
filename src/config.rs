use crate::data::{parse_date_millis, Interval};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "BINANCE_API_KEY";
pub const SECRET_KEY_ENV: &str = "BINANCE_SECRET_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api_key: String,
    pub api_secret: String,
    pub symbol: String,
    pub interval: Interval,
    pub start_date: String,
    pub end_date: String,
    pub timezone: String,
    pub base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            symbol: "SEIUSDT".to_string(),
            interval: Interval::FifteenMinutes,
            start_date: "2024.06.07".to_string(),
            end_date: "2024.06.08".to_string(),
            timezone: "Europe/Berlin".to_string(),
            base_url: "https://api.binance.com".to_string(),
        }
    }
}

impl AppConfig {
    pub fn sanitized(mut self) -> Self {
        self.symbol = self.symbol.trim().to_uppercase();
        if self.symbol.is_empty() {
            self.symbol = AppConfig::default().symbol;
        }

        self.api_key = self.api_key.trim().to_string();
        self.api_secret = self.api_secret.trim().to_string();
        self.timezone = self.timezone.trim().to_string();
        self
    }

    /// Overrides the credentials with whatever the environment provides.
    pub fn with_env_credentials(self) -> Self {
        self.with_credentials(
            std::env::var(API_KEY_ENV).ok(),
            std::env::var(SECRET_KEY_ENV).ok(),
        )
    }

    pub fn with_credentials(mut self, api_key: Option<String>, api_secret: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = key.trim().to_string();
        }
        if let Some(secret) = api_secret.filter(|s| !s.trim().is_empty()) {
            self.api_secret = secret.trim().to_string();
        }
        self
    }

    /// Checks credentials and the date range, returning the range on success.
    pub fn validate(&self) -> Result<(i64, i64), ConfigError> {
        if self.api_key.is_empty() || self.api_secret.is_empty() {
            return Err(ConfigError::MissingCredentials);
        }
        self.query_range()
    }

    /// Half-open `[start, end)` query bounds in epoch milliseconds.
    pub fn query_range(&self) -> Result<(i64, i64), ConfigError> {
        let start = parse_date_millis(&self.start_date, &self.timezone)?;
        let end = parse_date_millis(&self.end_date, &self.timezone)?;
        if start >= end {
            return Err(ConfigError::InvalidRange { start, end });
        }
        Ok((start, end))
    }
}

pub fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".swingchart.json")
}

/// Reads the config file; a missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }
        Err(e) => return Err(e.into()),
    };

    let config = serde_json::from_str::<AppConfig>(&contents)?;
    Ok(config.sanitized())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn with_keys() -> AppConfig {
        AppConfig::default().with_credentials(Some("key".into()), Some("secret".into()))
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"symbol": " btcusdt ", "interval": "1h", "unknown": 3}}"#).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.symbol, "BTCUSDT");
        assert_eq!(config.interval, Interval::OneHour);
        assert_eq!(config.timezone, "Europe/Berlin");
        assert_eq!(config.start_date, "2024.06.07");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(load_config(file.path()), Err(ConfigError::Json(_))));
    }

    #[test]
    fn unknown_interval_in_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"interval": "7m"}}"#).unwrap();
        assert!(matches!(load_config(file.path()), Err(ConfigError::Json(_))));
    }

    #[test]
    fn credentials_are_required() {
        assert!(matches!(
            AppConfig::default().validate(),
            Err(ConfigError::MissingCredentials)
        ));
        let only_key = AppConfig::default().with_credentials(Some("key".into()), None);
        assert!(matches!(
            only_key.validate(),
            Err(ConfigError::MissingCredentials)
        ));
        assert!(with_keys().validate().is_ok());
    }

    #[test]
    fn blank_override_keeps_existing_credentials() {
        let config = with_keys().with_credentials(Some("  ".into()), None);
        assert_eq!(config.api_key, "key");
        assert_eq!(config.api_secret, "secret");
    }

    #[test]
    fn default_range_is_one_berlin_day() {
        let (start, end) = AppConfig::default().query_range().unwrap();
        assert_eq!(start, 1717711200000);
        assert_eq!(end - start, 24 * 60 * 60 * 1000);
    }

    #[test]
    fn validation_returns_the_query_range() {
        let config = with_keys();
        assert_eq!(
            config.validate().unwrap(),
            (1717711200000, 1717711200000 + 24 * 60 * 60 * 1000)
        );
        assert_eq!(config.validate().unwrap(), config.query_range().unwrap());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let config = AppConfig {
            start_date: "2024.06.08".into(),
            end_date: "2024.06.07".into(),
            ..with_keys()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { .. })
        ));
    }

    #[test]
    fn bad_timezone_fails_validation() {
        let config = AppConfig {
            timezone: "Nowhere/Special".into(),
            ..with_keys()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownTimezone(_))
        ));
    }
}
