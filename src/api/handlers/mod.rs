//! HTTP request handlers.

pub mod application_handler;
pub mod report_handler;
pub mod sync_handler;

pub use application_handler::application_routes;
