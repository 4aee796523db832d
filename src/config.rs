use std::env;
use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_HEALTH_PATH, DEFAULT_RECOMMEND_PATH};
use crate::error::Result;

/// Config file read when neither `--config` nor `INERTIAFIT_CONFIG` is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub logging: LoggingConfig,
}

/// Where the recommendation service lives.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub recommend_path: String,
    pub health_path: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            recommend_path: DEFAULT_RECOMMEND_PATH.to_string(),
            health_path: DEFAULT_HEALTH_PATH.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl AppConfig {
    /// Load configuration: defaults, then a TOML file, then
    /// `INERTIAFIT__SECTION__KEY` environment variables.
    ///
    /// An explicitly named file must exist; the default file is optional.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let explicit = config_path
            .map(str::to_string)
            .or_else(|| env::var("INERTIAFIT_CONFIG").ok());

        let file = match &explicit {
            Some(path) => File::from(Path::new(path)).required(true),
            None => File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("INERTIAFIT")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
