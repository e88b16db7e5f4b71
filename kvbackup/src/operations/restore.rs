// File: kvbackup/src/operations/restore.rs
use tracing::{error, info};

use crate::errors::Result;
use crate::kv::KvStore;
use crate::snapshot::SnapshotDocument;
use crate::storage::{Destination, StorageBackend};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreReport {
    pub restored: usize,
}

/// Replay a snapshot into the store. The first failed write aborts the run;
/// keys written before it stay written, so re-running is the recovery path.
pub async fn execute_restore(
    kv: &dyn KvStore,
    storage: &StorageBackend,
    source: &Destination,
) -> Result<RestoreReport> {
    info!("Starting restore from {}", source);

    // Step 1: Fetch the snapshot
    let data = storage.read(source).await?;
    info!("✓ Read {} bytes from {}", data.len(), source);

    // Step 2: Decode before any write so a bad document changes nothing
    let document = SnapshotDocument::decode(&data)?;
    let total = document.len();
    info!("✓ Snapshot contains {} keys", total);

    // Step 3: Upsert every entry
    let mut restored = 0;
    for (key, value) in document.iter() {
        info!("restoring {}:{} ({}/{})", key, value, restored + 1, total);
        if let Err(e) = kv.put(key, value.as_bytes()).await {
            error!(
                "Restore aborted at '{}' after {} of {} keys: {}",
                key, restored, total, e
            );
            return Err(e.into());
        }
        restored += 1;
    }

    info!("Restore complete: {} keys written from {}", restored, source);

    Ok(RestoreReport { restored })
}
