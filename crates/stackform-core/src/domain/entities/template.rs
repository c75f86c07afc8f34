//! Template document aggregate.
//!
//! A [`Template`] is an ordered, append-only collection of declarations split
//! into three sections:
//!
//! ```text
//! Template (Aggregate Root)
//! ├── Description / AWSTemplateFormatVersion
//! ├── Parameters  name        -> Parameter (type, default, ...)
//! ├── Resources   logical id  -> Resource (kind, properties, DependsOn)
//! └── Outputs     name        -> Output (value expression, export)
//! ```
//!
//! Declarations are checked eagerly for naming problems (duplicates, invalid
//! ids, section limits) and the document is left untouched when a
//! declaration is rejected. Cross-declaration checks (references, required
//! properties) run in [`Template::validate`], because references may point
//! forward to declarations that do not exist yet.
//!
//! Parameters and resources share one namespace: `Ref` cannot tell them
//! apart, so a resource may not reuse a parameter's name.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::{Section, output::Output, parameter::Parameter, resource::Resource};
use crate::domain::{
    error::DomainError,
    validation::is_valid_logical_id,
    value_objects::{Reference, Value, is_pseudo_parameter},
};

/// The only template format version in existence.
pub const FORMAT_VERSION: &str = "2010-09-09";

/// In-memory template document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template {
    version: Option<&'static str>,
    description: Option<String>,
    parameters: IndexMap<String, Parameter>,
    resources: IndexMap<String, Resource>,
    outputs: IndexMap<String, Output>,
}

impl Template {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    /// Emit `AWSTemplateFormatVersion` at the top of the document.
    pub fn set_version(&mut self) {
        self.version = Some(FORMAT_VERSION);
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version
    }

    // -------------------------------------------------------------------------
    // Declarations
    // -------------------------------------------------------------------------

    /// Register a typed input parameter.
    ///
    /// # Errors
    /// - `DuplicateDeclaration` if the name is used by a parameter or resource
    /// - `InvalidLogicalId`, `LimitExceeded`, `InvalidParameterDefault`
    pub fn declare_parameter(&mut self, parameter: Parameter) -> Result<&Parameter, DomainError> {
        self.check_name(Section::Parameters, parameter.name())?;
        parameter.validate()?;

        let (index, _) = self
            .parameters
            .insert_full(parameter.name().to_string(), parameter);
        Ok(&self.parameters[index])
    }

    /// Register a resource. Its properties may reference declarations that
    /// are added later.
    ///
    /// # Errors
    /// - `DuplicateDeclaration` if the logical id is used by a parameter or resource
    /// - `InvalidLogicalId`, `LimitExceeded`
    pub fn declare_resource(&mut self, resource: Resource) -> Result<&Resource, DomainError> {
        self.check_name(Section::Resources, resource.logical_id())?;

        let (index, _) = self
            .resources
            .insert_full(resource.logical_id().to_string(), resource);
        Ok(&self.resources[index])
    }

    /// Register a named output.
    ///
    /// # Errors
    /// - `DuplicateDeclaration` if another output has the same name
    /// - `InvalidLogicalId`, `LimitExceeded`
    pub fn declare_output(&mut self, output: Output) -> Result<&Output, DomainError> {
        self.check_name(Section::Outputs, output.name())?;

        let (index, _) = self.outputs.insert_full(output.name().to_string(), output);
        Ok(&self.outputs[index])
    }

    /// Remove a resource declaration, keeping the order of the rest.
    pub fn remove_resource(&mut self, logical_id: &str) -> Result<Resource, DomainError> {
        self.resources
            .shift_remove(logical_id)
            .ok_or_else(|| DomainError::UnknownDeclaration {
                section: Section::Resources,
                name: logical_id.to_string(),
            })
    }

    fn check_name(&self, section: Section, name: &str) -> Result<(), DomainError> {
        if !is_valid_logical_id(name) {
            return Err(DomainError::InvalidLogicalId {
                section,
                name: name.to_string(),
            });
        }

        let taken = match section {
            Section::Parameters | Section::Resources => self.is_declared(name),
            Section::Outputs => self.outputs.contains_key(name),
        };
        if taken {
            return Err(DomainError::DuplicateDeclaration {
                section,
                name: name.to_string(),
            });
        }

        if self.len(section) >= section.limit() {
            return Err(DomainError::LimitExceeded {
                section,
                limit: section.limit(),
            });
        }

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// `true` if `name` is a declared parameter or resource.
    pub fn is_declared(&self, name: &str) -> bool {
        self.parameters.contains_key(name) || self.resources.contains_key(name)
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }

    pub fn resource(&self, logical_id: &str) -> Option<&Resource> {
        self.resources.get(logical_id)
    }

    pub fn output(&self, name: &str) -> Option<&Output> {
        self.outputs.get(name)
    }

    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.values()
    }

    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }

    pub fn outputs(&self) -> impl Iterator<Item = &Output> {
        self.outputs.values()
    }

    pub fn len(&self, section: Section) -> usize {
        match section {
            Section::Parameters => self.parameters.len(),
            Section::Resources => self.resources.len(),
            Section::Outputs => self.outputs.len(),
        }
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Check the whole document before it is rendered.
    ///
    /// Resources are checked in declaration order, then outputs, so the first
    /// reported error is stable for a given declaration sequence.
    ///
    /// # Errors
    /// - `EmptyTemplate` if no resource is declared
    /// - `MissingProperty` if a resource lacks a property its kind requires
    /// - `UnresolvedReference` if any reference or `DependsOn` points nowhere
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.resources.is_empty() {
            return Err(DomainError::EmptyTemplate);
        }

        for resource in self.resources.values() {
            resource.check_required()?;

            let referrer = format!("{}.{}", Section::Resources.key(), resource.logical_id());
            if let Some(missing) = resource
                .dependencies()
                .iter()
                .find(|d| !self.resources.contains_key(d.as_str()))
            {
                return Err(DomainError::UnresolvedReference {
                    referrer,
                    target: missing.clone(),
                });
            }

            for (_, value) in resource.properties() {
                self.check_references(&referrer, value)?;
            }
        }

        for output in self.outputs.values() {
            let referrer = format!("{}.{}", Section::Outputs.key(), output.name());
            self.check_references(&referrer, output.value())?;
            if let Some(export) = output.export_name() {
                self.check_references(&referrer, export)?;
            }
        }

        Ok(())
    }

    fn check_references(&self, referrer: &str, value: &Value) -> Result<(), DomainError> {
        for reference in value.references() {
            let resolved = match reference {
                Reference::Name(name) => is_pseudo_parameter(name) || self.is_declared(name),
                Reference::Attribute(name) => self.resources.contains_key(name),
            };

            if !resolved {
                return Err(DomainError::UnresolvedReference {
                    referrer: referrer.to_string(),
                    target: reference.target().to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Long-form serialization: `Description`, `Parameters`, `Resources`, `Outputs`
/// in that order, each section in declaration order.
impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(version) = self.version {
            map.serialize_entry("AWSTemplateFormatVersion", version)?;
        }
        if let Some(description) = &self.description {
            map.serialize_entry("Description", description)?;
        }
        if !self.parameters.is_empty() {
            map.serialize_entry(Section::Parameters.key(), &self.parameters)?;
        }
        map.serialize_entry(Section::Resources.key(), &self.resources)?;
        if !self.outputs.is_empty() {
            map.serialize_entry(Section::Outputs.key(), &self.outputs)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ParameterType, ResourceKind};

    fn vpc_with_subnet() -> Template {
        let mut t = Template::new();
        let cidr = t
            .declare_parameter(Parameter::new("VpcCIDR", ParameterType::String))
            .unwrap()
            .reference();
        let vpc = t
            .declare_resource(Resource::new("VPC", ResourceKind::Vpc).property("CidrBlock", cidr))
            .unwrap()
            .reference();
        t.declare_resource(Resource::new("Subnet1", ResourceKind::Subnet).property("VpcId", vpc))
            .unwrap();
        t
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    #[test]
    fn duplicate_parameter_fails_and_leaves_document_unchanged() {
        let mut t = vpc_with_subnet();
        let before = t.clone();

        let err = t
            .declare_parameter(Parameter::new("VpcCIDR", ParameterType::Number))
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::DuplicateDeclaration {
                section: Section::Parameters,
                name: "VpcCIDR".into()
            }
        );
        assert_eq!(t, before);
    }

    #[test]
    fn duplicate_resource_fails_and_leaves_document_unchanged() {
        let mut t = vpc_with_subnet();
        let before = t.clone();

        let err = t
            .declare_resource(Resource::new("VPC", ResourceKind::InternetGateway))
            .unwrap_err();

        assert!(matches!(err, DomainError::DuplicateDeclaration { .. }));
        assert_eq!(t, before);
        assert_eq!(t.resource("VPC").unwrap().kind(), &ResourceKind::Vpc);
    }

    #[test]
    fn parameters_and_resources_share_a_namespace() {
        let mut t = vpc_with_subnet();
        let err = t
            .declare_resource(Resource::new("VpcCIDR", ResourceKind::InternetGateway))
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::DuplicateDeclaration {
                section: Section::Resources,
                ..
            }
        ));
    }

    #[test]
    fn outputs_may_reuse_resource_names() {
        let mut t = vpc_with_subnet();
        assert!(t.declare_output(Output::new("VPC", Value::reference("VPC"))).is_ok());
        assert!(t.declare_output(Output::new("VPC", Value::reference("VPC"))).is_err());
    }

    #[test]
    fn non_alphanumeric_names_are_rejected() {
        let mut t = Template::new();
        for bad in ["", "My-Vpc", "Vpc 1", "Vpc_1"] {
            assert!(matches!(
                t.declare_resource(Resource::new(bad, ResourceKind::Vpc)),
                Err(DomainError::InvalidLogicalId { .. })
            ));
        }
        assert_eq!(t.len(Section::Resources), 0);
    }

    #[test]
    fn parameter_limit_is_enforced() {
        let mut t = Template::new();
        for i in 0..Section::Parameters.limit() {
            t.declare_parameter(Parameter::new(format!("P{i}"), ParameterType::String))
                .unwrap();
        }
        assert_eq!(
            t.declare_parameter(Parameter::new("OneTooMany", ParameterType::String))
                .unwrap_err(),
            DomainError::LimitExceeded {
                section: Section::Parameters,
                limit: 200
            }
        );
    }

    #[test]
    fn remove_resource_keeps_remaining_order() {
        let mut t = vpc_with_subnet();
        t.declare_resource(Resource::new("InternetGateway", ResourceKind::InternetGateway))
            .unwrap();

        let removed = t.remove_resource("Subnet1").unwrap();
        assert_eq!(removed.logical_id(), "Subnet1");

        let ids: Vec<_> = t.resources().map(Resource::logical_id).collect();
        assert_eq!(ids, ["VPC", "InternetGateway"]);

        assert!(matches!(
            t.remove_resource("Subnet1"),
            Err(DomainError::UnknownDeclaration { .. })
        ));
    }

    // ========================================================================
    // Validation
    // ========================================================================

    #[test]
    fn valid_document_passes() {
        assert!(vpc_with_subnet().validate().is_ok());
    }

    #[test]
    fn forward_references_resolve() {
        let mut t = Template::new();
        t.declare_resource(
            Resource::new("Subnet1", ResourceKind::Subnet).property("VpcId", Value::reference("VPC")),
        )
        .unwrap();
        t.declare_resource(Resource::new("VPC", ResourceKind::Vpc))
            .unwrap();
        assert!(t.validate().is_ok());
    }

    #[test]
    fn empty_document_is_rejected() {
        assert_eq!(Template::new().validate(), Err(DomainError::EmptyTemplate));
    }

    #[test]
    fn removed_target_becomes_unresolved() {
        let mut t = vpc_with_subnet();
        t.remove_resource("VPC").unwrap();
        assert_eq!(
            t.validate(),
            Err(DomainError::UnresolvedReference {
                referrer: "Resources.Subnet1".into(),
                target: "VPC".into()
            })
        );
    }

    #[test]
    fn missing_required_property_is_rejected() {
        let mut t = Template::new();
        t.declare_resource(Resource::new("Subnet1", ResourceKind::Subnet))
            .unwrap();
        assert!(matches!(
            t.validate(),
            Err(DomainError::MissingProperty {
                property: "VpcId",
                ..
            })
        ));
    }

    #[test]
    fn get_att_on_parameter_is_unresolved() {
        let mut t = vpc_with_subnet();
        t.declare_output(Output::new("Cidr", Value::get_att("VpcCIDR", "Value")))
            .unwrap();
        assert!(matches!(
            t.validate(),
            Err(DomainError::UnresolvedReference { referrer, .. }) if referrer == "Outputs.Cidr"
        ));
    }

    #[test]
    fn pseudo_parameters_and_sub_placeholders_resolve() {
        let mut t = vpc_with_subnet();
        t.declare_output(
            Output::new("Vpc", Value::reference("VPC"))
                .with_export(Value::sub("${AWS::StackName}-${VPC}-${VPC.CidrBlock}")),
        )
        .unwrap();
        assert!(t.validate().is_ok());
    }

    #[test]
    fn unknown_dependency_is_unresolved() {
        let mut t = vpc_with_subnet();
        t.declare_resource(
            Resource::new("InternetGateway", ResourceKind::InternetGateway).depends_on("Nope"),
        )
        .unwrap();
        assert!(matches!(
            t.validate(),
            Err(DomainError::UnresolvedReference { target, .. }) if target == "Nope"
        ));
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    #[test]
    fn sections_serialize_in_fixed_order() {
        let mut t = vpc_with_subnet();
        t.set_description("demo");
        t.declare_output(Output::new("VPC", Value::reference("VPC")))
            .unwrap();

        let json = serde_json::to_string(&t).unwrap();
        let positions: Vec<_> = ["\"Description\"", "\"Parameters\"", "\"Resources\"", "\"Outputs\""]
            .iter()
            .map(|k| json.find(k).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn version_is_emitted_first_when_set() {
        let mut t = vpc_with_subnet();
        t.set_version();
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.starts_with("{\"AWSTemplateFormatVersion\":\"2010-09-09\""));
    }
}
