//! Infrastructure adapters for Stackform.
//!
//! This crate implements the ports defined in `stackform-core::application::ports`.
//! It contains all serialization formats and I/O operations, plus the
//! blueprints that ship with the tool.

pub mod blueprints;
pub mod filesystem;
pub mod renderer;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::{IntrinsicStyle, JsonRenderer, YamlRenderer};
