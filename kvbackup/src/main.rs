// File: kvbackup/src/main.rs
use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use kvbackup::cli::{Args, Mode};
use kvbackup::storage::S3ObjectStore;
use kvbackup::{
    execute_backup, execute_restore, ConfigManager, ConsulClient, Destination, StorageBackend,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Exits with status 2 and usage when the location is missing
    let args = Args::parse();

    let env_filter = EnvFilter::from_default_env()
        .add_directive("kvbackup=info".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?)
        .add_directive("aws_config=warn".parse()?)
        .add_directive("aws_smithy_runtime=warn".parse()?);

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args).await {
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let config_manager = ConfigManager::new(args.config.as_deref()).await?;
    let config = config_manager.get_current_config();

    // Resolve the location before contacting anything
    let destination = Destination::parse(&args.location)?;

    let consul = ConsulClient::new(&config.consul)?;
    info!("Using Consul at {}", config.consul.base_url());

    let storage = StorageBackend::new(Arc::new(S3ObjectStore::new(config.s3.clone())));

    match args.mode() {
        Mode::Backup => {
            let report =
                execute_backup(&consul, &storage, &destination, args.write_options()).await?;
            if let Some(version) = &report.version_id {
                info!("Snapshot version: {}", version);
            }
        }
        Mode::Restore => {
            execute_restore(&consul, &storage, &destination).await?;
        }
    }

    Ok(())
}
