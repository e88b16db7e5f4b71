pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod kv;
pub mod operations;
pub mod snapshot;
pub mod storage;

// Re-export commonly used types
pub use config::{Config, ConfigManager};
pub use errors::{SnapshotError, StoreError};
pub use kv::{ConsulClient, KeyValuePair, KvStore};
pub use operations::{execute_backup, execute_restore, BackupReport, RestoreReport};
pub use snapshot::SnapshotDocument;
pub use storage::{Destination, StorageBackend, WriteOptions};
