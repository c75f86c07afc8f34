//! Core domain layer for Stackform.
//!
//! Pure template-document logic: no I/O and no serialization format. Text
//! rendering and file writing are handled via ports (traits) defined in the
//! application layer.
//!
//! - **No I/O**: No filesystem or network calls
//! - **Ordered**: Every collection keeps declaration order
//! - **All-or-nothing**: A rejected declaration leaves the document untouched
pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

pub use entities::{
    Section,
    output::Output,
    parameter::{Parameter, ParameterType},
    resource::{Resource, ResourceKind},
    template::{FORMAT_VERSION, Template},
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{Intrinsic, PSEUDO_PARAMETERS, Reference, Value, is_pseudo_parameter};

pub use validation::DomainValidator;
