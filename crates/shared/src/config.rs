//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Replenishment report configuration.
    #[serde(default)]
    pub replenishment: ReplenishmentConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration values as loaded from the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    28800 // 8 hours, one pharmacy shift
}

/// Tunables for the replenishment calculator and alert emitter.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplenishmentConfig {
    /// Service-level z-score used for safety stock (1.65 ~ 95% one-sided).
    #[serde(default = "default_service_level_z")]
    pub service_level_z: Decimal,
    /// Shelf life assumed when a product has no future-dated lots, in days.
    #[serde(default = "default_shelf_life_days")]
    pub default_shelf_life_days: i64,
    /// Lots expiring within this many days trigger a near-expiry alert.
    #[serde(default = "default_expiry_alert_days")]
    pub expiry_alert_days: i64,
}

fn default_service_level_z() -> Decimal {
    Decimal::new(165, 2) // 1.65
}

fn default_shelf_life_days() -> i64 {
    15
}

fn default_expiry_alert_days() -> i64 {
    7
}

impl Default for ReplenishmentConfig {
    fn default() -> Self {
        Self {
            service_level_z: default_service_level_z(),
            default_shelf_life_days: default_shelf_life_days(),
            expiry_alert_days: default_expiry_alert_days(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("STOCKFARM").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_replenishment_defaults() {
        let cfg = ReplenishmentConfig::default();
        assert_eq!(cfg.service_level_z, dec!(1.65));
        assert_eq!(cfg.default_shelf_life_days, 15);
        assert_eq!(cfg.expiry_alert_days, 7);
    }

    #[test]
    fn test_server_defaults() {
        assert_eq!(default_host(), "0.0.0.0");
        assert_eq!(default_port(), 8080);
        assert_eq!(default_max_connections(), 10);
    }
}
