//! JSON renderer (always long form).

use tracing::instrument;

use stackform_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::Template,
    error::StackformResult,
};

/// Renders templates as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for JsonRenderer {
    fn format(&self) -> &'static str {
        "json"
    }

    #[instrument(skip_all)]
    fn render(&self, template: &Template) -> StackformResult<String> {
        let mut text = serde_json::to_string_pretty(template).map_err(|e| {
            ApplicationError::RenderingFailed {
                format: "json",
                reason: e.to_string(),
            }
        })?;
        text.push('\n');
        Ok(text)
    }
}
