//! Key-value store access
//!
//! The pipelines only need two things from the store: list every pair under a
//! prefix, and upsert a single pair. [`KvStore`] captures that, and
//! [`ConsulClient`] implements it against the Consul HTTP API.

pub mod consul;

use async_trait::async_trait;

use crate::errors::StoreError;
pub use consul::ConsulClient;

/// A single entry as listed from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValuePair {
    pub key: String,
    pub value: Vec<u8>,
    /// Store-assigned creation sequence number, used only for ordering
    pub create_index: u64,
}

impl KeyValuePair {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>, create_index: u64) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            create_index,
        }
    }
}

#[async_trait]
pub trait KvStore: Send + Sync {
    /// List every pair whose key starts with `prefix`.
    async fn list(&self, prefix: &str) -> Result<Vec<KeyValuePair>, StoreError>;

    /// Create or replace `key` with `value`.
    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}
