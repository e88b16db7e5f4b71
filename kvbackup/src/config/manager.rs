// File: kvbackup/src/config/manager.rs
use super::Config;
use crate::constants;
use crate::errors::ConfigError;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    /// Defaults, then the optional TOML file, then environment variables.
    pub async fn new(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::load_file(path).await?,
            None => Config::default(),
        };
        Self::apply_env(&mut config, |name| std::env::var(name).ok())?;

        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_file(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::LoadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Overlay the standard Consul and AWS variables. `lookup` is injected so
    /// tests do not have to touch the process environment.
    pub fn apply_env<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(address) = non_empty(constants::consul::ENV_ADDRESS) {
            debug!("Consul address from {}", constants::consul::ENV_ADDRESS);
            config.consul.address = address;
        }
        if let Some(token) = non_empty(constants::consul::ENV_TOKEN) {
            config.consul.token = Some(token);
        }
        if let Some(ssl) = non_empty(constants::consul::ENV_SSL) {
            config.consul.use_tls = parse_bool(constants::consul::ENV_SSL, &ssl)?;
        }
        if let Some(dc) = non_empty(constants::consul::ENV_DATACENTER) {
            config.consul.datacenter = Some(dc);
        }
        if let Some(region) = non_empty(constants::s3::ENV_REGION) {
            config.s3.region = region;
        }
        // A custom endpoint defaults to path-style bucket addressing
        if let Some(endpoint) = non_empty(constants::s3::ENV_ENDPOINT) {
            config.s3.endpoint_url = Some(endpoint);
            config.s3.force_path_style = true;
        }
        if let Some(path_style) = non_empty(constants::s3::ENV_FORCE_PATH_STYLE) {
            config.s3.force_path_style =
                parse_bool(constants::s3::ENV_FORCE_PATH_STYLE, &path_style)?;
        }

        Ok(())
    }
}

fn parse_bool(field: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("expected a boolean, got '{}'", other),
        }),
    }
}
