//! KTP Admin - administrative service for identity-card applications
//!
//! Submitting, listing, sorting, editing, verifying, and undoing KTP
//! applications over HTTP, with a file-based sync channel for an external
//! native client and two swappable persistence backends.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, file store)
//! - **sync**: File channel shared with the external client
//! - **api**: HTTP handlers and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Process the external client's command file
//! cargo run -- sync command
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod sync;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Applicant, ApplicationForm, ApplicationStatus};
pub use errors::{AppError, AppResult};
