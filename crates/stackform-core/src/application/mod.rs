//! Application layer for Stackform.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (StackService)
//! - **Ports**: Interface definitions (traits) for rendering and writing
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! document rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::StackService;

pub use ports::{Filesystem, TemplateRenderer};

pub use error::ApplicationError;
