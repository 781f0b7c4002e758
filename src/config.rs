use std::time::Duration;
use thiserror::Error;

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("server port cannot be empty")]
    EmptyPort,
    #[error("invalid port number: {0}")]
    InvalidPort(String),
    #[error("GeoIP database path cannot be empty")]
    EmptyGeoIpPath,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub debug: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: String,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
    pub shutdown_timeout: Duration,
    pub environment: String,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub geoip_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: "8080".to_string(),
                read_timeout: Duration::from_secs(10),
                write_timeout: Duration::from_secs(10),
                shutdown_timeout: Duration::from_secs(30),
                environment: "development".to_string(),
            },
            database: DatabaseConfig {
                geoip_path: "data/GeoLite2-Country.mmdb".to_string(),
            },
            debug: false,
        }
    }
}

impl Config {
    /// Ensure all required settings are present and well-formed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port.is_empty() {
            return Err(ConfigError::EmptyPort);
        }
        if self.database.geoip_path.is_empty() {
            return Err(ConfigError::EmptyGeoIpPath);
        }
        if self.server.port.parse::<u16>().is_err() {
            return Err(ConfigError::InvalidPort(self.server.port.clone()));
        }
        Ok(())
    }

    /// Listen address on the IPv6 wildcard, e.g. `[::]:8080`. On dual-stack
    /// hosts this also accepts IPv4 clients as mapped addresses.
    pub fn address(&self) -> String {
        format!("[::]:{}", self.server.port)
    }

    pub fn is_production(&self) -> bool {
        self.server.environment == "production"
    }
}

/// Non-empty environment variable, if set.
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn env_duration(key: &str, default: Duration) -> Duration {
    env_var(key)
        .and_then(|v| humantime::parse_duration(&v).ok())
        .unwrap_or(default)
}

pub fn load_config() -> anyhow::Result<Config> {
    let defaults = Config::default();

    let port = env_var("PORT").unwrap_or(defaults.server.port);

    let read_timeout = env_duration("READ_TIMEOUT", defaults.server.read_timeout);
    let write_timeout = env_duration("WRITE_TIMEOUT", defaults.server.write_timeout);
    let shutdown_timeout = env_duration("SHUTDOWN_TIMEOUT", defaults.server.shutdown_timeout);

    let environment = env_var("ENVIRONMENT").unwrap_or(defaults.server.environment);

    let geoip_path = env_var("GEOIP_DB_PATH").unwrap_or(defaults.database.geoip_path);

    let debug = std::env::var("DEBUG").is_ok();

    let cfg = Config {
        server: ServerConfig {
            port,
            read_timeout,
            write_timeout,
            shutdown_timeout,
            environment,
        },
        database: DatabaseConfig { geoip_path },
        debug,
    };

    cfg.validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;

    Ok(cfg)
}
