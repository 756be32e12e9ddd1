use std::path::Path;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use url::Url;

pub const DEFAULTS: &str = include_str!("../config/default.json");
pub const ENVIRONMENT_PREFIX: &str = "security";
const ENVIRONMENT_SEPARATOR: &str = "__";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    metrics: MetricsSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let mut config = Config::new();

        config.merge(File::from_str(DEFAULTS, FileFormat::Json))?;
        config.merge(environment())?;

        config.try_into()
    }

    pub fn from_file<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let mut config = Config::new();

        config.merge(File::from_str(DEFAULTS, FileFormat::Json))?;
        config.merge(File::from(path.as_ref()))?;
        config.merge(environment())?;

        config.try_into()
    }

    pub fn metrics(&self) -> &MetricsSettings {
        &self.metrics
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENVIRONMENT_PREFIX).separator(ENVIRONMENT_SEPARATOR)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetricsSettings {
    enabled: bool,

    url: Url,

    client_id: String,
}

impl MetricsSettings {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}
