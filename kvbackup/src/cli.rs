//! CLI argument parsing for kvbackup

use std::path::PathBuf;

use clap::Parser;

use crate::storage::WriteOptions;

/// Which direction a run moves data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Backup,
    Restore,
}

/// Back up a Consul KV store to a JSON snapshot, or restore one
#[derive(Parser, Debug)]
#[command(name = "kvbackup")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Snapshot location: a local path or s3://bucket/path
    #[arg(value_name = "LOCATION")]
    pub location: String,

    /// Restore data instead of backing up
    #[arg(long)]
    pub restore: bool,

    /// Overwrite existing files
    #[arg(short = 'f')]
    pub force: bool,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn mode(&self) -> Mode {
        if self.restore {
            Mode::Restore
        } else {
            Mode::Backup
        }
    }

    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            overwrite: self.force,
        }
    }
}
