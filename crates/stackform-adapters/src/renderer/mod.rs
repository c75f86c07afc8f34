//! Template renderers.

mod json;
mod yaml;

pub use json::JsonRenderer;
pub use yaml::{IntrinsicStyle, YamlRenderer};
