// File: kvbackup/src/config/mod.rs
pub mod manager;
use serde::{Deserialize, Serialize};
pub use manager::ConfigManager;

use crate::constants;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub consul: ConsulConfig,
    #[serde(default)]
    pub s3: S3Config,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsulConfig {
    /// host:port or full URL of the Consul agent
    #[serde(default = "default_consul_address")]
    pub address: String,
    /// Use https when the address carries no scheme
    #[serde(default)]
    pub use_tls: bool,
    pub token: Option<String>,
    pub datacenter: Option<String>,
}

fn default_consul_address() -> String {
    constants::consul::DEFAULT_ADDRESS.to_string()
}

impl Default for ConsulConfig {
    fn default() -> Self {
        Self {
            address: default_consul_address(),
            use_tls: false,
            token: None,
            datacenter: None,
        }
    }
}

impl ConsulConfig {
    /// Base URL of the HTTP API, without a trailing slash
    pub fn base_url(&self) -> String {
        let address = self.address.trim_end_matches('/');
        if address.starts_with("http://") || address.starts_with("https://") {
            address.to_string()
        } else if self.use_tls {
            format!("https://{}", address)
        } else {
            format!("http://{}", address)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    #[serde(default = "default_s3_region")]
    pub region: String,
    /// Custom endpoint for S3-compatible services
    pub endpoint_url: Option<String>,
    #[serde(default)]
    pub force_path_style: bool,
}

fn default_s3_region() -> String {
    constants::s3::DEFAULT_REGION.to_string()
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            region: default_s3_region(),
            endpoint_url: None,
            force_path_style: false,
        }
    }
}
