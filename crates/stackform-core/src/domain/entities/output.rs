use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::value_objects::Value;

/// A named stack output bound to an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    name: String,
    value: Value,
    description: Option<String>,
    export_name: Option<Value>,
}

impl Output {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            description: None,
            export_name: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Export the output under a (possibly computed) name.
    pub fn with_export(mut self, name: impl Into<Value>) -> Self {
        self.export_name = Some(name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn export_name(&self) -> Option<&Value> {
        self.export_name.as_ref()
    }
}

impl Serialize for Output {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(description) = &self.description {
            map.serialize_entry("Description", description)?;
        }
        map.serialize_entry("Value", &self.value)?;
        if let Some(export) = &self.export_name {
            let mut name = indexmap::IndexMap::new();
            name.insert("Name", export);
            map.serialize_entry("Export", &name)?;
        }
        map.end()
    }
}
