pub mod backup;
pub mod restore;

pub use backup::{execute_backup, BackupReport};
pub use restore::{execute_restore, RestoreReport};
