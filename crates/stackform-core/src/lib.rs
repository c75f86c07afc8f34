//! Stackform Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Stackform
//! template generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          stackform-cli (CLI)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │             (StackService)              │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │    (Driven: Filesystem, Renderer)       │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   stackform-adapters (Infrastructure)   │
//! │ (YamlRenderer, LocalFilesystem, etc.)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (Template, Parameter, Resource, Output) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stackform_core::domain::{Parameter, ParameterType, Resource, ResourceKind, Template};
//!
//! let mut template = Template::new();
//! let cidr = template
//!     .declare_parameter(Parameter::new("VpcCIDR", ParameterType::String))
//!     .unwrap()
//!     .reference();
//! template
//!     .declare_resource(Resource::new("VPC", ResourceKind::Vpc).property("CidrBlock", cidr))
//!     .unwrap();
//! template.validate().unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        StackService,
        ports::{Filesystem, TemplateRenderer},
    };
    pub use crate::domain::{
        Intrinsic, Output, Parameter, ParameterType, Resource, ResourceKind, Section, Template,
        Value,
    };
    pub use crate::error::{StackformError, StackformResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
