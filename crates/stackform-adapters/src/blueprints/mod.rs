//! Built-in blueprints.
//!
//! A blueprint declares a fixed sequence of parameters, resources, and
//! outputs into a fresh [`Template`](stackform_core::domain::Template).
//! All values stay deferred to the template's own parameters, so a
//! blueprint takes no input.

pub mod public_vpc;

pub use public_vpc::public_vpc;
