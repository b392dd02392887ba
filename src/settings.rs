use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub port: u16,
    pub debug: bool,
    pub enable_swagger: bool,
    /// IANA timezone name the facility's slot hours are interpreted in.
    pub timezone: String,
    pub public_base_url: Url,
    /// Daily availability grid bounds, half-open `[open_hour, close_hour)`.
    pub open_hour: u8,
    pub close_hour: u8,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // Load from environment variables with APP_ prefix
            .add_source(Environment::with_prefix("APP").separator("_"))
            .set_default("port", 8080)?
            .set_default("debug", false)?
            .set_default("enable_swagger", true)?
            .set_default("timezone", "UTC")?
            .set_default("public_base_url", "http://localhost:8080")?
            .set_default("open_hour", 8)?
            .set_default("close_hour", 23)?
            .build()?;

        config.try_deserialize()
    }

    pub fn facility_timezone(&self) -> chrono_tz::Tz {
        self.timezone.parse().unwrap_or_else(|_| {
            warn!(timezone = %self.timezone, "unknown timezone, falling back to UTC");
            chrono_tz::UTC
        })
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    fn clear_env() {
        for key in ["APP_PORT", "APP_DEBUG", "APP_TIMEZONE"] {
            unsafe { std::env::remove_var(key) };
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.port, 8080);
        assert!(!settings.debug);
        assert!(settings.enable_swagger);
        assert_eq!(settings.timezone, "UTC");
        assert_eq!(settings.open_hour, 8);
        assert_eq!(settings.close_hour, 23);
    }

    #[test]
    #[serial]
    fn test_env_override() {
        clear_env();
        unsafe { std::env::set_var("APP_PORT", "9090") };
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.port, 9090);
        clear_env();
    }

    #[test]
    fn test_facility_timezone_fallback() {
        let mut settings = Settings {
            port: 8080,
            debug: false,
            enable_swagger: true,
            timezone: "Europe/Warsaw".into(),
            public_base_url: Url::parse("http://localhost:8080").unwrap(),
            open_hour: 8,
            close_hour: 23,
        };
        assert_eq!(settings.facility_timezone(), chrono_tz::Europe::Warsaw);

        settings.timezone = "Mars/Olympus".into();
        assert_eq!(settings.facility_timezone(), chrono_tz::UTC);
    }
}
