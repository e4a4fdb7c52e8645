use crate::analytics::metrics::MissingSkuPolicy;
use crate::analytics::trend::DEFAULT_TOLERANCE;
use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub analytics: AnalyticsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let missing_sku_policy = match env::var("ANALYTICS_MISSING_SKU") {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "skip" | "skip_profit" => MissingSkuPolicy::SkipProfit,
                "fail" | "fatal" => MissingSkuPolicy::Fail,
                _ => return Err(ConfigError::InvalidMissingSkuPolicy { value }),
            },
            Err(_) => MissingSkuPolicy::default(),
        };

        let trend_tolerance = match env::var("ANALYTICS_TREND_TOLERANCE") {
            Ok(value) => value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|tolerance| *tolerance >= 0.0)
                .ok_or(ConfigError::InvalidTrendTolerance { value })?,
            Err(_) => DEFAULT_TOLERANCE,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            analytics: AnalyticsConfig {
                missing_sku_policy,
                trend_tolerance,
            },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Knobs for the analytics engine itself.
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    pub missing_sku_policy: MissingSkuPolicy,
    pub trend_tolerance: f64,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidMissingSkuPolicy { value: String },
    InvalidTrendTolerance { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMissingSkuPolicy { value } => {
                write!(f, "ANALYTICS_MISSING_SKU must be 'skip' or 'fail', got '{value}'")
            }
            ConfigError::InvalidTrendTolerance { value } => {
                write!(
                    f,
                    "ANALYTICS_TREND_TOLERANCE must be a non-negative number, got '{value}'"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("ANALYTICS_MISSING_SKU");
        env::remove_var("ANALYTICS_TREND_TOLERANCE");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.analytics.missing_sku_policy, MissingSkuPolicy::SkipProfit);
        assert_eq!(config.analytics.trend_tolerance, DEFAULT_TOLERANCE);
    }

    #[test]
    fn accepts_fatal_missing_sku_policy() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ANALYTICS_MISSING_SKU", "fail");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.analytics.missing_sku_policy, MissingSkuPolicy::Fail);
        reset_env();
    }

    #[test]
    fn rejects_negative_tolerance() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ANALYTICS_TREND_TOLERANCE", "-0.1");
        let error = AppConfig::load().expect_err("negative tolerance rejected");
        assert!(matches!(error, ConfigError::InvalidTrendTolerance { .. }));
        reset_env();
    }
}
