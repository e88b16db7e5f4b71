// File: kvbackup/src/storage/local.rs
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::{WriteOptions, WriteOutcome};
use crate::constants;
use crate::errors::{Result, SnapshotError};

/// Fail with `AlreadyExists` when `path` exists and overwrite is off.
pub async fn ensure_writable(path: &Path, options: WriteOptions) -> Result<()> {
    if options.overwrite {
        return Ok(());
    }

    match fs::try_exists(path).await {
        Ok(true) => Err(SnapshotError::AlreadyExists {
            path: path.to_path_buf(),
        }),
        Ok(false) => Ok(()),
        Err(source) => Err(SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub async fn write(path: &Path, data: &[u8], options: WriteOptions) -> Result<WriteOutcome> {
    ensure_writable(path, options).await?;

    let io_err = |source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut open = fs::OpenOptions::new();
    open.write(true).create(true).truncate(true);
    #[cfg(unix)]
    open.mode(constants::document::FILE_MODE);

    let mut file = open.open(path).await.map_err(io_err)?;
    file.write_all(data).await.map_err(io_err)?;
    file.flush().await.map_err(io_err)?;

    info!("Wrote snapshot to {} ({} bytes)", path.display(), data.len());

    Ok(WriteOutcome {
        location: path.display().to_string(),
        bytes: data.len(),
        version_id: None,
    })
}

pub async fn read(path: &Path) -> Result<Vec<u8>> {
    debug!("Reading snapshot from {}", path.display());

    fs::read(path).await.map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            SnapshotError::NotFound {
                location: path.display().to_string(),
            }
        } else {
            SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}
