//! File-based sync channel for the external native client.
//!
//! Not a wire protocol: the client and this service exchange plain text
//! files under the shared data directory.

pub mod channel;
pub mod processor;

pub use channel::{format_record, parse_command, SyncChannel, SyncCommand};
pub use processor::SyncProcessor;
