use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::{error::DomainError, value_objects::Value};

/// Declared type of a template parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParameterType {
    #[default]
    String,
    Number,
    NumberList,
    CommaDelimitedList,
}

impl ParameterType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Number => "Number",
            Self::NumberList => "List<Number>",
            Self::CommaDelimitedList => "CommaDelimitedList",
        }
    }

    /// Check that a literal default fits this type.
    fn accepts(self, literal: &str) -> bool {
        match self {
            Self::String | Self::CommaDelimitedList => true,
            Self::Number => literal.trim().parse::<f64>().is_ok(),
            Self::NumberList => literal
                .split(',')
                .all(|n| n.trim().parse::<f64>().is_ok()),
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ParameterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "String" => Ok(Self::String),
            "Number" => Ok(Self::Number),
            "List<Number>" => Ok(Self::NumberList),
            "CommaDelimitedList" => Ok(Self::CommaDelimitedList),
            other => Err(format!("unknown parameter type '{}'", other)),
        }
    }
}

/// A named, typed input placeholder whose value is supplied at provisioning time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    kind: ParameterType,
    description: Option<String>,
    default: Option<String>,
    allowed_values: Vec<String>,
    allowed_pattern: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, kind: ParameterType) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            default: None,
            allowed_values: Vec::new(),
            allowed_pattern: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_allowed_values<S: Into<String>>(
        mut self,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_allowed_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.allowed_pattern = Some(pattern.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ParameterType {
        self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// `Ref` to this parameter.
    pub fn reference(&self) -> Value {
        Value::reference(&self.name)
    }

    /// Basic typing checks; no provider-specific validation.
    pub fn validate(&self) -> Result<(), DomainError> {
        let Some(default) = &self.default else {
            return Ok(());
        };

        if !self.kind.accepts(default) {
            return Err(DomainError::InvalidParameterDefault {
                name: self.name.clone(),
                reason: format!("'{}' is not a valid {}", default, self.kind),
            });
        }

        if !self.allowed_values.is_empty() && !self.allowed_values.iter().any(|v| v == default) {
            return Err(DomainError::InvalidParameterDefault {
                name: self.name.clone(),
                reason: format!("'{}' is not one of the allowed values", default),
            });
        }

        Ok(())
    }
}

impl Serialize for Parameter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("Type", self.kind.as_str())?;
        if let Some(description) = &self.description {
            map.serialize_entry("Description", description)?;
        }
        if let Some(default) = &self.default {
            map.serialize_entry("Default", default)?;
        }
        if !self.allowed_values.is_empty() {
            map.serialize_entry("AllowedValues", &self.allowed_values)?;
        }
        if let Some(pattern) = &self.allowed_pattern {
            map.serialize_entry("AllowedPattern", pattern)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_type_round_trips_through_str() {
        for kind in [
            ParameterType::String,
            ParameterType::Number,
            ParameterType::NumberList,
            ParameterType::CommaDelimitedList,
        ] {
            assert_eq!(kind.as_str().parse::<ParameterType>().unwrap(), kind);
        }
        assert!("Boolean".parse::<ParameterType>().is_err());
    }

    #[test]
    fn number_default_must_be_numeric() {
        let bad = Parameter::new("Count", ParameterType::Number).with_default("three");
        assert!(matches!(
            bad.validate(),
            Err(DomainError::InvalidParameterDefault { .. })
        ));

        let good = Parameter::new("Count", ParameterType::Number).with_default("3");
        assert!(good.validate().is_ok());
    }

    #[test]
    fn default_must_be_allowed() {
        let p = Parameter::new("Env", ParameterType::String)
            .with_allowed_values(["dev", "prod"])
            .with_default("test");
        assert!(p.validate().is_err());
    }

    #[test]
    fn serializes_type_first_and_skips_unset_fields() {
        let p = Parameter::new("Name", ParameterType::String);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json, serde_json::json!({ "Type": "String" }));
    }

    #[test]
    fn serializes_constraints_after_type() {
        let p = Parameter::new("VpcCIDR", ParameterType::String)
            .with_description("CIDR block for the VPC")
            .with_default("10.0.0.0/16")
            .with_allowed_pattern(r"^(\d{1,3}\.){3}\d{1,3}/\d{1,2}$");
        assert!(p.validate().is_ok());

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Type": "String",
                "Description": "CIDR block for the VPC",
                "Default": "10.0.0.0/16",
                "AllowedPattern": r"^(\d{1,3}\.){3}\d{1,3}/\d{1,2}$",
            })
        );
    }
}
