//! Configuration management

use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::constants::{AUTHORIZATION_HEADER, DEFAULT_SESSION_TTL, DEFAULT_SWEEP_INTERVAL};
use crate::duration::parse_duration;
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub session: SessionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    /// `postgres://...`, or `memory://` for the in-process store.
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub run_migrations: bool,
}

impl DatabaseSettings {
    pub fn is_in_memory(&self) -> bool {
        self.url.starts_with("memory:")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub ttl: String,
    pub sweep_interval: String,
    pub header: String,
    pub accept_bearer_prefix: bool,
}

impl SessionSettings {
    pub fn ttl(&self) -> Result<Duration, AppError> {
        parse_duration(&self.ttl)
    }

    pub fn sweep_interval(&self) -> Result<Duration, AppError> {
        let interval = parse_duration(&self.sweep_interval)?;
        if interval.is_zero() {
            return Err(AppError::InvalidDuration {
                value: self.sweep_interval.clone(),
                reason: "sweep interval must be positive".to_string(),
            });
        }
        Ok(interval)
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_SESSION_TTL.to_string(),
            sweep_interval: DEFAULT_SWEEP_INTERVAL.to_string(),
            header: AUTHORIZATION_HEADER.to_string(),
            accept_bearer_prefix: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
}

impl AppConfig {
    /// Loads and validates the configuration; bad durations fail here.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", env.as_str())?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "taskhub-server")?
            .set_default("database.url", "memory://")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout_secs", 3)?
            .set_default("database.run_migrations", true)?
            .set_default("session.ttl", DEFAULT_SESSION_TTL)?
            .set_default("session.sweep_interval", DEFAULT_SWEEP_INTERVAL)?
            .set_default("session.header", AUTHORIZATION_HEADER)?
            .set_default("session.accept_bearer_prefix", false)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.session.ttl()?;
        config.session.sweep_interval()?;
        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.app.env == "production"
    }
}
