//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stackform-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `TemplateRenderer`: Document to text
//!   - `Filesystem`: Artifact writing

pub mod output;

pub use output::{Filesystem, TemplateRenderer};
