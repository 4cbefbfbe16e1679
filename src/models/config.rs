//! Configuration model loaded from external sources.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::pagination::DEFAULT_PAGE_SIZE;

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared by the binaries.
pub struct ServerConfig {
    pub database_url: String,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
}

impl ServerConfig {
    /// Loads `config/default`, the optional `config/{app_env}` profile and
    /// `APP_`-prefixed environment overrides, in that order.
    pub fn load(app_env: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?
            .try_deserialize::<ServerConfig>()
    }
}
