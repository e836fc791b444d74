//! Domain layer - Pure catalog abstractions
//!
//! Record types, repository traits, address accessors and error types.
//! Implementations of the repositories live in the infrastructure layer.

pub mod errors;
pub mod repositories;
pub mod urls;
pub mod validation;

pub use errors::DomainError;
pub use repositories::*;
pub use urls::{AbsoluteUrl, DetailRoute};
