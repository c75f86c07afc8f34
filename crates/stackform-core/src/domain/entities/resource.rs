use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::{error::DomainError, value_objects::Value};

/// Resource type of a declaration.
///
/// The EC2 networking kinds are modelled explicitly so their required
/// properties can be checked; anything else goes through `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Vpc,
    InternetGateway,
    VpcGatewayAttachment,
    Subnet,
    RouteTable,
    Route,
    SubnetRouteTableAssociation,
    Other(String),
}

impl ResourceKind {
    pub fn type_name(&self) -> &str {
        match self {
            Self::Vpc => "AWS::EC2::VPC",
            Self::InternetGateway => "AWS::EC2::InternetGateway",
            Self::VpcGatewayAttachment => "AWS::EC2::VPCGatewayAttachment",
            Self::Subnet => "AWS::EC2::Subnet",
            Self::RouteTable => "AWS::EC2::RouteTable",
            Self::Route => "AWS::EC2::Route",
            Self::SubnetRouteTableAssociation => "AWS::EC2::SubnetRouteTableAssociation",
            Self::Other(name) => name,
        }
    }

    /// Properties a declaration of this kind must carry.
    pub fn required_properties(&self) -> &'static [&'static str] {
        match self {
            Self::Vpc | Self::InternetGateway | Self::Other(_) => &[],
            Self::VpcGatewayAttachment | Self::Subnet | Self::RouteTable => &["VpcId"],
            Self::Route => &["RouteTableId"],
            Self::SubnetRouteTableAssociation => &["RouteTableId", "SubnetId"],
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "AWS::EC2::VPC" => Self::Vpc,
            "AWS::EC2::InternetGateway" => Self::InternetGateway,
            "AWS::EC2::VPCGatewayAttachment" => Self::VpcGatewayAttachment,
            "AWS::EC2::Subnet" => Self::Subnet,
            "AWS::EC2::RouteTable" => Self::RouteTable,
            "AWS::EC2::Route" => Self::Route,
            "AWS::EC2::SubnetRouteTableAssociation" => Self::SubnetRouteTableAssociation,
            other if other.split("::").count() == 3 => Self::Other(other.to_string()),
            other => return Err(format!("'{}' is not a resource type name", other)),
        };
        Ok(kind)
    }
}

/// A resource declaration: logical id, kind, and ordered properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    logical_id: String,
    kind: ResourceKind,
    properties: IndexMap<String, Value>,
    depends_on: Vec<String>,
}

impl Resource {
    pub fn new(logical_id: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            logical_id: logical_id.into(),
            kind,
            properties: IndexMap::new(),
            depends_on: Vec::new(),
        }
    }

    /// Set a property; setting it again replaces the value in place.
    pub fn property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn depends_on(mut self, logical_id: impl Into<String>) -> Self {
        self.depends_on.push(logical_id.into());
        self
    }

    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    pub fn kind(&self) -> &ResourceKind {
        &self.kind
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, property: &str) -> Option<&Value> {
        self.properties.get(property)
    }

    pub fn dependencies(&self) -> &[String] {
        &self.depends_on
    }

    /// `Ref` to this resource.
    pub fn reference(&self) -> Value {
        Value::reference(&self.logical_id)
    }

    /// `Fn::GetAtt` on this resource.
    pub fn attribute(&self, attribute: impl Into<String>) -> Value {
        Value::get_att(&self.logical_id, attribute)
    }

    pub(crate) fn check_required(&self) -> Result<(), DomainError> {
        match self
            .kind
            .required_properties()
            .iter()
            .find(|p| !self.properties.contains_key(**p))
        {
            Some(&property) => Err(DomainError::MissingProperty {
                resource: self.logical_id.clone(),
                kind: self.kind.to_string(),
                property,
            }),
            None => Ok(()),
        }
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("Type", self.kind.type_name())?;
        match self.depends_on.as_slice() {
            [] => {}
            [single] => map.serialize_entry("DependsOn", single)?,
            many => map.serialize_entry("DependsOn", many)?,
        }
        if !self.properties.is_empty() {
            map.serialize_entry("Properties", &self.properties)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_known_and_other_types() {
        assert_eq!(
            "AWS::EC2::Subnet".parse::<ResourceKind>().unwrap(),
            ResourceKind::Subnet
        );
        assert_eq!(
            "AWS::S3::Bucket".parse::<ResourceKind>().unwrap(),
            ResourceKind::Other("AWS::S3::Bucket".into())
        );
        assert!("Bucket".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn association_requires_both_ids() {
        let r = Resource::new("Assoc", ResourceKind::SubnetRouteTableAssociation)
            .property("RouteTableId", Value::reference("RouteTable"));
        assert_eq!(
            r.check_required(),
            Err(DomainError::MissingProperty {
                resource: "Assoc".into(),
                kind: "AWS::EC2::SubnetRouteTableAssociation".into(),
                property: "SubnetId",
            })
        );
    }

    #[test]
    fn property_order_is_declaration_order() {
        let r = Resource::new("Subnet1", ResourceKind::Subnet)
            .property("VpcId", Value::reference("VPC"))
            .property("CidrBlock", Value::reference("Subnet1CIDR"))
            .property("AvailabilityZone", Value::select(0, Value::get_azs("")));
        let names: Vec<_> = r.properties().map(|(k, _)| k).collect();
        assert_eq!(names, ["VpcId", "CidrBlock", "AvailabilityZone"]);
    }

    #[test]
    fn serializes_type_then_properties() {
        let r = Resource::new("InternetGateway", ResourceKind::InternetGateway);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json, serde_json::json!({ "Type": "AWS::EC2::InternetGateway" }));
    }
}
