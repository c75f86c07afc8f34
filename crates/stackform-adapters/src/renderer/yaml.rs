//! YAML renderer.
//!
//! The document is first serialized in long form (`{Ref: VPC}`). For
//! [`IntrinsicStyle::Short`], every property value and output expression is
//! then re-emitted from its domain [`Value`], with each [`Intrinsic`] written
//! as a YAML tag (`!Ref VPC`, `!GetAtt VPC.CidrBlock`). Section keys,
//! logical ids and plain maps are never tagged, whatever their names.

use serde_yaml::{
    Mapping, Value as Yaml,
    value::{Tag, TaggedValue},
};
use tracing::{instrument, trace};

use stackform_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{Intrinsic, Section, Template, Value},
    error::{StackformError, StackformResult},
};

/// How intrinsic functions are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IntrinsicStyle {
    /// `!Ref VPC`
    #[default]
    Short,
    /// `Ref: VPC`
    Long,
}

/// Renders templates as YAML.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlRenderer {
    style: IntrinsicStyle,
}

impl YamlRenderer {
    /// Short-form renderer.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: IntrinsicStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> IntrinsicStyle {
        self.style
    }
}

impl TemplateRenderer for YamlRenderer {
    fn format(&self) -> &'static str {
        "yaml"
    }

    #[instrument(skip_all, fields(style = ?self.style))]
    fn render(&self, template: &Template) -> StackformResult<String> {
        let mut doc = serde_yaml::to_value(template).map_err(rendering_failed)?;
        if self.style == IntrinsicStyle::Short {
            shorten(&mut doc, template);
        }
        serde_yaml::to_string(&doc).map_err(rendering_failed)
    }
}

fn rendering_failed(e: serde_yaml::Error) -> StackformError {
    ApplicationError::RenderingFailed {
        format: "yaml",
        reason: e.to_string(),
    }
    .into()
}

/// Replace every long-form expression slot in `doc` with its short form.
fn shorten(doc: &mut Yaml, template: &Template) {
    if let Some(resources) = doc.get_mut(Section::Resources.key()) {
        for resource in template.resources() {
            let Some(properties) = resources
                .get_mut(resource.logical_id())
                .and_then(|r| r.get_mut("Properties"))
            else {
                continue;
            };
            for (name, value) in resource.properties() {
                if let Some(slot) = properties.get_mut(name) {
                    *slot = short_form(value);
                }
            }
        }
    }

    if let Some(outputs) = doc.get_mut(Section::Outputs.key()) {
        for output in template.outputs() {
            let Some(entry) = outputs.get_mut(output.name()) else {
                continue;
            };
            if let Some(slot) = entry.get_mut("Value") {
                *slot = short_form(output.value());
            }
            if let Some(export) = output.export_name() {
                if let Some(slot) = entry.get_mut("Export").and_then(|e| e.get_mut("Name")) {
                    *slot = short_form(export);
                }
            }
        }
    }
}

fn short_form(value: &Value) -> Yaml {
    match value {
        Value::String(s) => Yaml::String(s.clone()),
        Value::Integer(i) => Yaml::Number((*i).into()),
        Value::Bool(b) => Yaml::Bool(*b),
        Value::List(items) => Yaml::Sequence(items.iter().map(short_form).collect()),
        Value::Map(map) => Yaml::Mapping(
            map.iter()
                .map(|(k, v)| (Yaml::String(k.clone()), short_form(v)))
                .collect::<Mapping>(),
        ),
        Value::Intrinsic(function) => short_intrinsic(function),
    }
}

fn short_intrinsic(function: &Intrinsic) -> Yaml {
    trace!(function = %function, "Short-form intrinsic");
    let argument = match function {
        Intrinsic::Ref(name) => Yaml::String(name.clone()),
        Intrinsic::GetAtt {
            resource,
            attribute,
        } => Yaml::String(format!("{resource}.{attribute}")),
        Intrinsic::GetAZs(region) => Yaml::String(region.clone()),
        // Index is written as a string, as in long form.
        Intrinsic::Select { index, list } => {
            Yaml::Sequence(vec![Yaml::String(index.to_string()), short_form(list)])
        }
        Intrinsic::Sub(template) => Yaml::String(template.clone()),
        Intrinsic::Join { delimiter, values } => Yaml::Sequence(vec![
            Yaml::String(delimiter.clone()),
            Yaml::Sequence(values.iter().map(short_form).collect()),
        ]),
    };
    let name = function.key();
    let tag = name.strip_prefix("Fn::").unwrap_or(name);
    Yaml::Tagged(Box::new(TaggedValue {
        tag: Tag::new(tag),
        value: argument,
    }))
}
