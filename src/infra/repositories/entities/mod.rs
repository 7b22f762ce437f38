//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod application;
pub mod revision;

// Re-exports for public API convenience
#[allow(unused_imports)]
pub use application::{
    ActiveModel as ApplicationActiveModel, Entity as ApplicationEntity, Model as ApplicationModel,
};
#[allow(unused_imports)]
pub use revision::{
    ActiveModel as RevisionActiveModel, Entity as RevisionEntity, Model as RevisionModel,
};
