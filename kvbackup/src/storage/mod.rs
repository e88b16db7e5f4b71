//! Snapshot storage backends
//!
//! A location string is parsed once into a [`Destination`]. Reads and writes
//! then dispatch on the variant:
//!
//! ```text
//! "backup.json"          -> LocalFile    -> tokio::fs
//! "s3://bucket/key.json" -> RemoteObject -> ObjectStore (S3)
//! ```
//!
//! The overwrite policy is passed per write in [`WriteOptions`]. Local files
//! are checked for existence first; remote objects are plain upserts.

pub mod local;
pub mod location;
pub mod remote;
pub mod s3;

use std::sync::Arc;

use crate::errors::Result;
pub use location::Destination;
pub use remote::{ObjectStore, ObjectStoreError, PutObject, Visibility};
pub use s3::S3ObjectStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Replace an existing local file
    pub overwrite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub location: String,
    pub bytes: usize,
    /// Object version assigned by a versioned bucket
    pub version_id: Option<String>,
}

pub struct StorageBackend {
    object_store: Arc<dyn ObjectStore>,
}

impl StorageBackend {
    pub fn new(object_store: Arc<dyn ObjectStore>) -> Self {
        Self { object_store }
    }

    /// Fail early if a write to `destination` would be refused.
    pub async fn ensure_writable(
        &self,
        destination: &Destination,
        options: WriteOptions,
    ) -> Result<()> {
        match destination {
            Destination::LocalFile(path) => local::ensure_writable(path, options).await,
            Destination::RemoteObject { .. } => Ok(()),
        }
    }

    pub async fn write(
        &self,
        destination: &Destination,
        data: &[u8],
        options: WriteOptions,
    ) -> Result<WriteOutcome> {
        match destination {
            Destination::LocalFile(path) => local::write(path, data, options).await,
            Destination::RemoteObject { bucket, key } => {
                remote::write(self.object_store.as_ref(), bucket, key, data, options).await
            }
        }
    }

    pub async fn read(&self, source: &Destination) -> Result<Vec<u8>> {
        match source {
            Destination::LocalFile(path) => local::read(path).await,
            Destination::RemoteObject { bucket, key } => {
                remote::read(self.object_store.as_ref(), bucket, key).await
            }
        }
    }
}
