// File: kvbackup/src/operations/backup.rs
use tracing::{info, warn};

use crate::constants;
use crate::errors::Result;
use crate::kv::KvStore;
use crate::snapshot::{self, SnapshotDocument};
use crate::storage::{Destination, StorageBackend, WriteOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupReport {
    pub keys: usize,
    pub bytes: usize,
    pub location: String,
    pub version_id: Option<String>,
}

pub async fn execute_backup(
    kv: &dyn KvStore,
    storage: &StorageBackend,
    destination: &Destination,
    options: WriteOptions,
) -> Result<BackupReport> {
    info!("Starting backup to {}", destination);

    // Step 1: Refuse an existing local file before touching the store
    storage.ensure_writable(destination, options).await?;

    // Step 2: List the whole key space
    let mut pairs = kv.list(constants::consul::ROOT_PREFIX).await?;
    info!("✓ Listed {} keys", pairs.len());

    // Step 3: Order by creation so successive snapshots diff cleanly
    snapshot::sort_by_create_index(&mut pairs);

    // Step 4: Encode
    let document = SnapshotDocument::from_pairs(&pairs);
    if document.lossy_values() > 0 {
        warn!(
            "{} values were not valid UTF-8 and cannot be restored byte-for-byte",
            document.lossy_values()
        );
    }
    let data = document.encode();

    // Step 5: Persist
    let outcome = storage.write(destination, &data, options).await?;

    info!(
        "Backup complete: {} keys, {} bytes written to {}",
        document.len(),
        outcome.bytes,
        outcome.location
    );

    Ok(BackupReport {
        keys: document.len(),
        bytes: outcome.bytes,
        location: outcome.location,
        version_id: outcome.version_id,
    })
}
