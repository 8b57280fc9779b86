//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::GuardConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Overrides `chain.rpc_url`.
pub const RPC_URL_ENV_VAR: &str = "ACCESSTIME_RPC_URL";
/// Overrides `access_time.contract_address`.
pub const CONTRACT_ADDRESS_ENV_VAR: &str = "ACCESSTIME_CONTRACT_ADDRESS";
/// Overrides `access_time.min_remaining_time`.
pub const MIN_REMAINING_TIME_ENV_VAR: &str = "ACCESSTIME_MIN_REMAINING_TIME";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, value } => write!(f, "Invalid value '{}' for {}", value, var),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GuardConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content, |var| std::env::var(var).ok())
}

/// Like [`load_config`], but starts from defaults when `path` does not exist.
pub fn load_config_or_default(path: &Path) -> Result<GuardConfig, ConfigError> {
    if path.exists() {
        return load_config(path);
    }
    tracing::warn!(path = ?path, "Config file not found, using defaults and environment");
    parse_config("", |var| std::env::var(var).ok())
}

/// Parse TOML, apply environment overrides from `env`, then validate.
pub fn parse_config<F>(content: &str, env: F) -> Result<GuardConfig, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
{
    let mut config: GuardConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
    apply_env_overrides(&mut config, env)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn apply_env_overrides<F>(config: &mut GuardConfig, env: F) -> Result<(), ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
{
    if let Some(url) = env(RPC_URL_ENV_VAR) {
        config.chain.rpc_url = url;
    }
    if let Some(address) = env(CONTRACT_ADDRESS_ENV_VAR) {
        config.access_time.contract_address = address;
    }
    if let Some(value) = env(MIN_REMAINING_TIME_ENV_VAR) {
        config.access_time.min_remaining_time = value.trim().parse().map_err(|_| ConfigError::Env {
            var: MIN_REMAINING_TIME_ENV_VAR,
            value,
        })?;
    }
    Ok(())
}
