use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::notion::{DEFAULT_BASE_URL, NOTION_VERSION};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Scan-page attempts remembered for reload protection.
    #[serde(default = "default_attempt_capacity")]
    pub attempt_capacity: usize,
}

fn default_attempt_capacity() -> usize { 1024 }

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub notion_version: String,
    pub token: String,
    pub database_id: String,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(File::with_name("config/local").required(false))
            // Eg.. `STOCKSCAN__SERVER__PORT=8080`
            .add_source(Environment::with_prefix("STOCKSCAN").separator("__").try_parsing(true))
            .set_override_option("store.token", env::var("NOTION_TOKEN").ok())?
            .set_override_option("store.database_id", env::var("NOTION_DATABASE_ID").ok())?;

        Self::finish(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("server.port", 3000_i64)?
            .set_default("store.base_url", DEFAULT_BASE_URL)?
            .set_default("store.notion_version", NOTION_VERSION)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;

        if config.store.token.trim().is_empty() {
            return Err(ConfigError::Message("store.token must not be empty".into()));
        }
        if config.store.database_id.trim().is_empty() {
            return Err(ConfigError::Message("store.database_id must not be empty".into()));
        }

        Ok(config)
    }
}
