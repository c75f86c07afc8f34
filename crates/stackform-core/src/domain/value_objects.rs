//! Property values and intrinsic functions.
//!
//! A [`Value`] is anything that can appear on the right-hand side of a
//! resource property or an output: plain scalars, lists, ordered maps, and
//! [`Intrinsic`] functions that the provisioning engine resolves at deploy
//! time (`Ref`, `Fn::GetAtt`, `Fn::Select`, ...).
//!
//! Serialization here is the *long form* (`{"Ref": "VPC"}`); adapters that
//! want YAML short form (`!Ref VPC`) rewrite the tree after the fact.

use std::fmt;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Pseudo parameters that every stack can `Ref` without declaring them.
pub const PSEUDO_PARAMETERS: &[&str] = &[
    "AWS::AccountId",
    "AWS::NoValue",
    "AWS::NotificationARNs",
    "AWS::Partition",
    "AWS::Region",
    "AWS::StackId",
    "AWS::StackName",
    "AWS::URLSuffix",
];

pub fn is_pseudo_parameter(name: &str) -> bool {
    PSEUDO_PARAMETERS.contains(&name)
}

/// A property or output value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Bool(bool),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
    Intrinsic(Box<Intrinsic>),
}

/// Functions evaluated by the provisioning engine, not by us.
#[derive(Debug, Clone, PartialEq)]
pub enum Intrinsic {
    /// `Ref` to a parameter, resource, or pseudo parameter.
    Ref(String),
    /// `Fn::GetAtt` on a resource.
    GetAtt { resource: String, attribute: String },
    /// `Fn::GetAZs`; an empty region means the stack's own region.
    GetAZs(String),
    /// `Fn::Select` from a list by index.
    Select { index: usize, list: Value },
    /// `Fn::Sub` with `${Name}` placeholders.
    Sub(String),
    /// `Fn::Join` with a delimiter.
    Join { delimiter: String, values: Vec<Value> },
}

/// A reference from one declaration to another, as found inside a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference<'a> {
    /// `Ref` or `${Name}`: may target a parameter, resource, or pseudo parameter.
    Name(&'a str),
    /// `Fn::GetAtt` or `${Name.Attr}`: must target a resource.
    Attribute(&'a str),
}

impl<'a> Reference<'a> {
    pub fn target(&self) -> &'a str {
        match *self {
            Self::Name(name) | Self::Attribute(name) => name,
        }
    }
}

impl Value {
    /// `Ref` to another declaration.
    pub fn reference(name: impl Into<String>) -> Self {
        Intrinsic::Ref(name.into()).into()
    }

    pub fn get_att(resource: impl Into<String>, attribute: impl Into<String>) -> Self {
        Intrinsic::GetAtt {
            resource: resource.into(),
            attribute: attribute.into(),
        }
        .into()
    }

    pub fn get_azs(region: impl Into<String>) -> Self {
        Intrinsic::GetAZs(region.into()).into()
    }

    pub fn select(index: usize, list: impl Into<Value>) -> Self {
        Intrinsic::Select {
            index,
            list: list.into(),
        }
        .into()
    }

    pub fn sub(template: impl Into<String>) -> Self {
        Intrinsic::Sub(template.into()).into()
    }

    pub fn join(delimiter: impl Into<String>, values: Vec<Value>) -> Self {
        Intrinsic::Join {
            delimiter: delimiter.into(),
            values,
        }
        .into()
    }

    /// Resource tag list: `[{Key: k, Value: v}, ...]`.
    pub fn tags<K, V>(tags: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::List(
            tags.into_iter()
                .map(|(key, value)| {
                    let mut tag = IndexMap::new();
                    tag.insert("Key".to_string(), Value::String(key.into()));
                    tag.insert("Value".to_string(), value.into());
                    Value::Map(tag)
                })
                .collect(),
        )
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Every reference this value makes, in document order.
    pub fn references(&self) -> Vec<Reference<'_>> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<Reference<'a>>) {
        match self {
            Self::List(items) => items.iter().for_each(|v| v.collect_references(out)),
            Self::Map(map) => map.values().for_each(|v| v.collect_references(out)),
            Self::Intrinsic(function) => function.collect_references(out),
            Self::String(_) | Self::Integer(_) | Self::Bool(_) => {}
        }
    }
}

impl Intrinsic {
    /// Long-form key, e.g. `Fn::Select`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Ref(_) => "Ref",
            Self::GetAtt { .. } => "Fn::GetAtt",
            Self::GetAZs(_) => "Fn::GetAZs",
            Self::Select { .. } => "Fn::Select",
            Self::Sub(_) => "Fn::Sub",
            Self::Join { .. } => "Fn::Join",
        }
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<Reference<'a>>) {
        match self {
            Self::Ref(name) => out.push(Reference::Name(name)),
            Self::GetAtt { resource, .. } => out.push(Reference::Attribute(resource)),
            Self::GetAZs(_) => {}
            Self::Select { list, .. } => list.collect_references(out),
            Self::Sub(template) => out.extend(sub_placeholders(template)),
            Self::Join { values, .. } => values.iter().for_each(|v| v.collect_references(out)),
        }
    }
}

/// Placeholders of an `Fn::Sub` string. `${!Literal}` is an escape, not a reference.
fn sub_placeholders(template: &str) -> Vec<Reference<'_>> {
    let mut refs = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };

        let name = after[..end].trim();
        if !name.is_empty() && !name.starts_with('!') {
            match name.split_once('.') {
                Some((resource, _)) => refs.push(Reference::Attribute(resource)),
                None => refs.push(Reference::Name(name)),
            }
        }

        rest = &after[end + 1..];
    }

    refs
}

impl From<Intrinsic> for Value {
    fn from(function: Intrinsic) -> Self {
        Value::Intrinsic(Box::new(function))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Integer(n) => serializer.serialize_i64(*n),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::List(items) => items.serialize(serializer),
            Self::Map(map) => map.serialize(serializer),
            Self::Intrinsic(function) => function.serialize(serializer),
        }
    }
}

impl Serialize for Intrinsic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::Ref(name) => map.serialize_entry(self.key(), name)?,
            Self::GetAtt {
                resource,
                attribute,
            } => map.serialize_entry(self.key(), &[resource, attribute])?,
            Self::GetAZs(region) => map.serialize_entry(self.key(), region)?,
            // Index is written as a string.
            Self::Select { index, list } => {
                map.serialize_entry(self.key(), &(index.to_string(), list))?
            }
            Self::Sub(template) => map.serialize_entry(self.key(), template)?,
            Self::Join { delimiter, values } => {
                map.serialize_entry(self.key(), &(delimiter, values))?
            }
        }
        map.end()
    }
}

impl fmt::Display for Intrinsic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ref(name) => write!(f, "Ref({})", name),
            Self::GetAtt {
                resource,
                attribute,
            } => write!(f, "GetAtt({}.{})", resource, attribute),
            other => write!(f, "{}", other.key()),
        }
    }
}
