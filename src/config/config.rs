use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::firebase::{EndpointsConfig, FirebaseOptions};
use super::logging::LoggingConfig;

/// Environment variable naming the config file to read.
pub const CONFIG_PATH_ENV: &str = "FIREBIND_CONFIG";
/// Prefix for environment overrides, nested keys split on `__`.
pub const ENV_PREFIX: &str = "FIREBIND_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: the backend binding, its endpoints and logging.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    pub firebase: FirebaseOptions,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The default provider chain: the YAML file, then `FIREBIND_*` variables on top.
pub fn figment() -> Figment {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "./config.yaml".to_string());
    Figment::new()
        .merge(Yaml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Extract the versioned config from `figment` and return its `1.0.0` body.
pub fn load_config_from(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Load config from `./config.yaml` (or `$FIREBIND_CONFIG`) plus the environment.
/// A broken configuration is fatal.
pub fn load_config() -> ConfigV1 {
    match load_config_from(figment()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() {
    let schema = schema_for!(Config);
    match serde_json::to_string_pretty(&schema) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Error rendering schema: {}", e),
    }
}
