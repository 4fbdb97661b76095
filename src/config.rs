use chrono_tz::Tz;
use std::{env, path::PathBuf, time::Duration};
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_WINDOW_DAYS: u32 = 30;
pub const MAX_WINDOW_DAYS: u32 = 366;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Process settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub api_url: String,
    /// Calendar days for the trend chart are taken in this timezone.
    pub timezone: Tz,
    pub window_days: u32,
    pub api_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            data_path: PathBuf::from("data/identity.json"),
            api_url: DEFAULT_API_URL.to_string(),
            timezone: Tz::UTC,
            window_days: DEFAULT_WINDOW_DAYS,
            api_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("PORT") {
            config.port = parse("PORT", value, |v| v.parse::<u16>().map_err(|e| e.to_string()))?;
        }
        if let Some(value) = lookup("APP_DATA_PATH") {
            config.data_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("REPORT_API_URL") {
            config.api_url = value.trim_end_matches('/').to_string();
        }
        if let Some(value) = lookup("REPORT_TIMEZONE") {
            config.timezone = parse("REPORT_TIMEZONE", value, |v| {
                v.parse::<Tz>().map_err(|e| e.to_string())
            })?;
        }
        if let Some(value) = lookup("TREND_WINDOW_DAYS") {
            config.window_days = parse("TREND_WINDOW_DAYS", value, |v| match v.parse::<u32>() {
                Ok(days) if (1..=MAX_WINDOW_DAYS).contains(&days) => Ok(days),
                Ok(_) => Err(format!("must be between 1 and {MAX_WINDOW_DAYS}")),
                Err(err) => Err(err.to_string()),
            })?;
        }
        if let Some(value) = lookup("REPORT_API_TIMEOUT_SECS") {
            config.api_timeout = parse("REPORT_API_TIMEOUT_SECS", value, |v| {
                v.parse::<u64>().map(Duration::from_secs).map_err(|e| e.to_string())
            })?;
        }

        Ok(config)
    }
}

fn parse<T>(
    name: &'static str,
    value: String,
    parser: impl FnOnce(&str) -> Result<T, String>,
) -> Result<T, ConfigError> {
    parser(value.trim()).map_err(|reason| ConfigError::Invalid {
        name,
        value,
        reason,
    })
}
