//! Sync command - drives the file channel for the external client.

use crate::cli::args::{SyncArgs, SyncAction};
use crate::config::Config;
use crate::errors::AppResult;
use crate::services::{ServiceContainer, Services};
use crate::sync::{SyncChannel, SyncProcessor};

/// Execute the sync command
pub async fn execute(args: SyncArgs, config: Config) -> AppResult<()> {
    let store = crate::infra::build_store(&config).await?;
    let services = Services::from_store(store.clone());

    let processor = SyncProcessor::new(
        SyncChannel::new(&config.data_dir),
        services.applications(),
        store,
    );

    match args.action {
        SyncAction::Command => {
            tracing::info!("Processing command file...");
            processor.process_command().await?;
            tracing::info!("Command processing complete");
        }
        SyncAction::Pull => {
            tracing::info!("Syncing applications to dump file...");
            let count = processor.pull().await?;
            tracing::info!("Synced {} applications", count);
        }
    }

    Ok(())
}
