// File: kvbackup/src/kv/consul.rs
use async_trait::async_trait;
use base64::Engine;
use reqwest::{Client, RequestBuilder, Url};
use serde::Deserialize;
use tracing::debug;

use super::{KeyValuePair, KvStore};
use crate::config::ConsulConfig;
use crate::constants;
use crate::errors::{ConfigError, StoreError};

/// Entry shape returned by `GET /v1/kv/<prefix>?recurse`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ConsulKvEntry {
    key: String,
    create_index: u64,
    #[serde(default)]
    value: Option<String>,
}

pub struct ConsulClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
    datacenter: Option<String>,
}

impl ConsulClient {
    pub fn new(config: &ConsulConfig) -> Result<Self, ConfigError> {
        let base_url = Url::parse(&config.base_url()).map_err(|e| ConfigError::InvalidValue {
            field: "consul.address".to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue {
                field: "consul.address".to_string(),
                reason: format!("'{}' cannot be used as a base URL", base_url),
            });
        }

        // No timeout: a hung agent blocks the run until it is killed
        let client = Client::new();

        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
            datacenter: config.datacenter.clone(),
        })
    }

    /// `/v1/kv/<key>` with each key segment escaped on its own.
    ///
    /// URL parsing resolves `.` and `..` segments, so such a key would address
    /// a different entry. Those keys are refused.
    fn kv_url(&self, key: &str) -> Result<Url, StoreError> {
        if let Some(segment) = key.split('/').find(|s| matches!(*s, "." | "..")) {
            return Err(StoreError::InvalidKey {
                key: key.to_string(),
                reason: format!("'{}' segments cannot be addressed over HTTP", segment),
            });
        }

        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["v1", "kv"]);
            segments.extend(key.split('/'));
        }
        if let Some(dc) = &self.datacenter {
            url.query_pairs_mut().append_pair("dc", dc);
        }
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(constants::consul::TOKEN_HEADER, token),
            None => request,
        }
    }

    fn decode_entry(entry: ConsulKvEntry) -> Result<KeyValuePair, StoreError> {
        let value = match entry.value {
            Some(encoded) => base64::engine::general_purpose::STANDARD
                .decode(encoded.as_bytes())
                .map_err(|e| StoreError::Decode {
                    operation: "list".to_string(),
                    reason: format!("value of '{}' is not base64: {}", entry.key, e),
                })?,
            None => Vec::new(),
        };

        Ok(KeyValuePair {
            key: entry.key,
            value,
            create_index: entry.create_index,
        })
    }
}

#[async_trait]
impl KvStore for ConsulClient {
    async fn list(&self, prefix: &str) -> Result<Vec<KeyValuePair>, StoreError> {
        let mut url = self.kv_url(prefix)?;
        url.query_pairs_mut().append_pair("recurse", "true");

        debug!("Listing keys from {}", url);

        let response = self
            .authorize(self.client.get(url.clone()))
            .send()
            .await
            .map_err(|e| StoreError::Request {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        // Consul answers 404 when nothing lives under the prefix
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            debug!("No keys under prefix '{}'", prefix);
            return Ok(Vec::new());
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                operation: "list".to_string(),
                status,
                body,
            });
        }

        let entries: Vec<ConsulKvEntry> =
            response.json().await.map_err(|e| StoreError::Decode {
                operation: "list".to_string(),
                reason: e.to_string(),
            })?;

        entries.into_iter().map(Self::decode_entry).collect()
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let url = self.kv_url(key)?;

        let response = self
            .authorize(self.client.put(url.clone()))
            .body(value.to_vec())
            .send()
            .await
            .map_err(|e| StoreError::Request {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(StoreError::Status {
                operation: format!("put '{}'", key),
                status: status.as_u16(),
                body,
            });
        }

        if body.trim() != "true" {
            return Err(StoreError::Rejected {
                key: key.to_string(),
            });
        }

        Ok(())
    }
}
