use async_trait::async_trait;
use base64::Engine;
use md5::{Digest, Md5};
use thiserror::Error;
use tracing::{info, warn};

use super::{WriteOptions, WriteOutcome};
use crate::constants;
use crate::errors::{Result, SnapshotError};

/// Who may read a stored object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Private,
    PublicRead,
}

/// A single object upload
#[derive(Debug, Clone)]
pub struct PutObject<'a> {
    pub bucket: &'a str,
    pub key: &'a str,
    pub body: &'a [u8],
    pub content_type: &'a str,
    pub visibility: Visibility,
    /// Base64 MD5 of `body`, checked by the service on arrival
    pub content_md5: String,
}

/// Failure reported by an object store
#[derive(Debug, Error)]
pub enum ObjectStoreError {
    #[error("object not found")]
    NotFound,
    #[error("{0}")]
    Other(String),
}

/// Object storage capability consumed by the remote backend
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError>;

    /// Store an object, returning its version id when the bucket is versioned.
    async fn put(&self, request: PutObject<'_>) -> Result<Option<String>, ObjectStoreError>;
}

/// Base64-encoded MD5 digest, the form expected in a `Content-MD5` header.
pub fn content_md5(data: &[u8]) -> String {
    let digest = Md5::digest(data);
    base64::engine::general_purpose::STANDARD.encode(digest)
}

fn object_location(bucket: &str, key: &str) -> String {
    format!("{}://{}/{}", constants::s3::SCHEME, bucket, key)
}

pub async fn write(
    store: &dyn ObjectStore,
    bucket: &str,
    key: &str,
    data: &[u8],
    options: WriteOptions,
) -> Result<WriteOutcome> {
    let location = object_location(bucket, key);

    if !options.overwrite {
        warn!(
            "Any existing object at {} will be replaced by a new version",
            location
        );
    }

    let request = PutObject {
        bucket,
        key,
        body: data,
        content_type: constants::document::CONTENT_TYPE,
        visibility: Visibility::Private,
        content_md5: content_md5(data),
    };

    let version_id = store.put(request).await.map_err(|e| match e {
        ObjectStoreError::NotFound => SnapshotError::Transport {
            location: location.clone(),
            reason: format!("bucket '{}' does not exist", bucket),
        },
        ObjectStoreError::Other(reason) => SnapshotError::Transport {
            location: location.clone(),
            reason,
        },
    })?;

    info!(
        "Backed up to {}/{} version {}",
        bucket,
        key,
        version_id.as_deref().unwrap_or("(unversioned)")
    );

    Ok(WriteOutcome {
        location,
        bytes: data.len(),
        version_id,
    })
}

pub async fn read(store: &dyn ObjectStore, bucket: &str, key: &str) -> Result<Vec<u8>> {
    let location = object_location(bucket, key);

    store.get(bucket, key).await.map_err(|e| match e {
        ObjectStoreError::NotFound => SnapshotError::NotFound { location },
        ObjectStoreError::Other(reason) => SnapshotError::Transport { location, reason },
    })
}
