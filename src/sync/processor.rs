//! Executes commands arriving over the file channel.
//!
//! Mirrors the HTTP operations: each mutating command routes through the
//! same service layer, then the dump file is rewritten so the client sees
//! the result. Command-level failures are reported through the response
//! file, not as process errors.

use std::sync::Arc;

use super::channel::{SyncChannel, SyncCommand};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::services::ApplicationService;

/// One-shot processor for the file channel.
pub struct SyncProcessor {
    channel: SyncChannel,
    applications: Arc<dyn ApplicationService>,
    store: Arc<dyn UnitOfWork>,
}

impl SyncProcessor {
    pub fn new(
        channel: SyncChannel,
        applications: Arc<dyn ApplicationService>,
        store: Arc<dyn UnitOfWork>,
    ) -> Self {
        Self {
            channel,
            applications,
            store,
        }
    }

    /// Process the pending command file and write the response.
    ///
    /// Returns Err only when the channel files themselves cannot be
    /// written; everything else ends up as a response message.
    pub async fn process_command(&self) -> AppResult<()> {
        let command = match self.channel.read_command() {
            Ok(command) => command,
            Err(AppError::BadRequest(msg)) => {
                return self.channel.write_response(&msg);
            }
            Err(e) => {
                return self
                    .channel
                    .write_response(&format!("Error processing command: {}", e));
            }
        };

        tracing::info!(?command, "Processing sync command");

        let message = match command {
            SyncCommand::Submit(application) => {
                let id = application.id.clone();
                match self.store.applications().insert(application).await {
                    Ok(_) => {
                        self.refresh_dump().await?;
                        format!("Application submitted successfully. ID: {}", id)
                    }
                    Err(e) => format!("Error submitting application: {}", e),
                }
            }
            SyncCommand::Verify { id } => match self.applications.verify(&id).await {
                Ok(_) => {
                    self.refresh_dump().await?;
                    format!("Application {} has been verified.", id)
                }
                Err(e) => format!("Error verifying application: {}", e),
            },
            SyncCommand::Edit { id, form } => match self.applications.edit(&id, form).await {
                Ok(_) => {
                    self.refresh_dump().await?;
                    format!("Application updated. ID: {}", id)
                }
                Err(e) => format!("Error editing application: {}", e),
            },
            SyncCommand::Undo { id } => match self.applications.undo(&id).await {
                Ok(_) => {
                    self.refresh_dump().await?;
                    format!("Revision undone for application {}", id)
                }
                Err(AppError::NotFound) => {
                    format!("No revisions found for application {}", id)
                }
                Err(e) => format!("Error undoing revision: {}", e),
            },
            SyncCommand::Refresh => {
                let count = self.refresh_dump().await?;
                format!("Successfully synced {} applications.", count)
            }
        };

        self.channel.write_response(&message)
    }

    /// Rewrite the dump file from the store; returns the record count.
    pub async fn refresh_dump(&self) -> AppResult<usize> {
        let applications = self.applications.list().await?;
        self.channel.write_dump(&applications)?;
        Ok(applications.len())
    }

    /// Full pull: rewrite the dump and report through the response file.
    pub async fn pull(&self) -> AppResult<usize> {
        let count = self.refresh_dump().await?;
        self.channel
            .write_response(&format!("Successfully synced {} applications.", count))?;
        Ok(count)
    }
}
