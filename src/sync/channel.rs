//! File channel shared with the external native client.
//!
//! The client drops a two-line command file (command name, then a
//! pipe-delimited payload) and reads back a one-line response file plus a
//! pipe-delimited full dump of all applications.

use std::fs;
use std::path::PathBuf;

use crate::config::{is_valid_status, COMMAND_FILE, RESPONSE_FILE, SYNC_DUMP_FILE};
use crate::domain::{Applicant, ApplicationForm, ApplicationStatus};
use crate::errors::{AppError, AppResult};

/// A command read from the command file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncCommand {
    /// Insert a record exactly as provided by the client (id and
    /// submission time included)
    Submit(Applicant),
    Verify { id: String },
    Edit { id: String, form: ApplicationForm },
    Undo { id: String },
    /// Rewrite the dump file from the store
    Refresh,
}

/// Parse the two-line command file content.
///
/// Error messages are the exact strings written back to the response file.
pub fn parse_command(content: &str) -> AppResult<SyncCommand> {
    let mut lines = content.lines();
    let command = lines.next().map(str::trim).unwrap_or_default();
    let data = lines.next().map(str::trim).unwrap_or_default();

    // refresh carries no payload; everything else requires one
    if command.is_empty() || (data.is_empty() && command != "refresh") {
        return Err(AppError::bad_request("Invalid command file format."));
    }

    match command {
        "submit" => parse_submit_payload(data).map(SyncCommand::Submit),
        "verify" => Ok(SyncCommand::Verify {
            id: data.to_string(),
        }),
        "edit" => parse_edit_payload(data),
        "undo" => Ok(SyncCommand::Undo {
            id: data.to_string(),
        }),
        "refresh" => Ok(SyncCommand::Refresh),
        other => Err(AppError::bad_request(format!("Unknown command: {}", other))),
    }
}

/// `id|name|address|region|submission_time|status`
fn parse_submit_payload(data: &str) -> AppResult<Applicant> {
    let parts: Vec<&str> = data.split('|').collect();
    if parts.len() < 6 {
        return Err(AppError::bad_request("Invalid submit data format."));
    }

    let submission_time: i64 = parts[4].parse().map_err(|_| {
        AppError::bad_request(format!(
            "Invalid submission time format: \"{}\"",
            parts[4]
        ))
    })?;

    if !is_valid_status(parts[5]) {
        return Err(AppError::bad_request(format!(
            "Invalid status: \"{}\"",
            parts[5]
        )));
    }

    Ok(Applicant {
        id: parts[0].to_string(),
        name: parts[1].to_string(),
        address: parts[2].to_string(),
        region: parts[3].to_string(),
        submission_time,
        status: ApplicationStatus::from(parts[5]),
    })
}

/// `id|name|address|region`
fn parse_edit_payload(data: &str) -> AppResult<SyncCommand> {
    let parts: Vec<&str> = data.split('|').collect();
    if parts.len() < 4 {
        return Err(AppError::bad_request("Invalid edit data format."));
    }

    Ok(SyncCommand::Edit {
        id: parts[0].to_string(),
        form: ApplicationForm {
            name: parts[1].to_string(),
            address: parts[2].to_string(),
            region: parts[3].to_string(),
        },
    })
}

/// One dump line: `id|name|address|region|submission_time|status`
pub fn format_record(app: &Applicant) -> String {
    format!(
        "{}|{}|{}|{}|{}|{}",
        app.id, app.name, app.address, app.region, app.submission_time, app.status
    )
}

/// The file locations of the channel under a data directory.
pub struct SyncChannel {
    data_dir: PathBuf,
}

impl SyncChannel {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn command_path(&self) -> PathBuf {
        self.data_dir.join(COMMAND_FILE)
    }

    pub fn response_path(&self) -> PathBuf {
        self.data_dir.join(RESPONSE_FILE)
    }

    pub fn dump_path(&self) -> PathBuf {
        self.data_dir.join(SYNC_DUMP_FILE)
    }

    fn ensure_data_dir(&self) -> AppResult<()> {
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    /// Read and parse the pending command file.
    pub fn read_command(&self) -> AppResult<SyncCommand> {
        let path = self.command_path();
        if !path.exists() {
            return Err(AppError::bad_request("Command file not found."));
        }
        let content = fs::read_to_string(path)?;
        parse_command(&content)
    }

    /// Write the one-line result read back by the client.
    pub fn write_response(&self, message: &str) -> AppResult<()> {
        self.ensure_data_dir()?;
        tracing::debug!("sync response: {}", message);
        fs::write(self.response_path(), message)?;
        Ok(())
    }

    /// Rewrite the full pipe-delimited dump.
    pub fn write_dump(&self, applications: &[Applicant]) -> AppResult<()> {
        self.ensure_data_dir()?;
        let mut content = applications
            .iter()
            .map(format_record)
            .collect::<Vec<_>>()
            .join("\n");
        content.push('\n');
        fs::write(self.dump_path(), content)?;
        Ok(())
    }
}
