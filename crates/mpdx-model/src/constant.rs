//! Constant ids and the two shapes a field's value mapping takes.
//!
//! The API persists value mappings as [`ConstantGroup`] lists (one group per
//! canonical constant, holding every raw value mapped to it). The editor works
//! on a [`FlatValueMapping`] instead, where each raw value points at its
//! constant directly.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::FieldId;

/// Canonical value accepted by the destination system for a raw CSV value.
///
/// The wire format overloads `""`, `null` and the string `"null"` to mean
/// "not classified yet"; all of them become [`ConstantId::Unassigned`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ConstantId {
    /// Not mapped / do not import.
    #[default]
    Unassigned,
    /// Boolean constant (`send_appeals`).
    Bool(bool),
    /// Any other constant, passed through unchanged (case included).
    Value(String),
}

impl ConstantId {
    /// Normalise a raw constant as it comes out of an editor or the API.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") | Some("null") => Self::Unassigned,
            Some("true") => Self::Bool(true),
            Some("false") => Self::Bool(false),
            Some(other) => Self::Value(other.to_string()),
        }
    }

    pub fn is_unassigned(&self) -> bool {
        matches!(self, Self::Unassigned)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Label shown in tables; unassigned renders as an empty string.
    pub fn display_value(&self) -> String {
        match self {
            Self::Unassigned => String::new(),
            Self::Bool(value) => value.to_string(),
            Self::Value(value) => value.clone(),
        }
    }
}

impl From<bool> for ConstantId {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for ConstantId {
    fn from(value: &str) -> Self {
        Self::from_raw(Some(value))
    }
}

impl From<Option<&str>> for ConstantId {
    fn from(value: Option<&str>) -> Self {
        Self::from_raw(value)
    }
}

impl fmt::Display for ConstantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unassigned => f.write_str("(unassigned)"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Value(value) => f.write_str(value),
        }
    }
}

impl Serialize for ConstantId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unassigned => serializer.serialize_str(""),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Value(value) => serializer.serialize_str(value),
        }
    }
}

struct ConstantIdVisitor;

impl<'de> Visitor<'de> for ConstantIdVisitor {
    type Value = ConstantId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, boolean or null constant id")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(ConstantId::Bool(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(ConstantId::from_raw(Some(value)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ConstantId::Unassigned)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ConstantId::Unassigned)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Deserialize<'de> for ConstantId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ConstantIdVisitor)
    }
}

/// One constant of a field together with every raw value mapped to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantGroup {
    #[serde(default)]
    pub id: ConstantId,
    #[serde(default)]
    pub values: Vec<String>,
}

impl ConstantGroup {
    pub fn new(id: ConstantId) -> Self {
        Self {
            id,
            values: Vec::new(),
        }
    }

    pub fn with_values<I, S>(id: ConstantId, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// A canonical constant published by the API, with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantDescriptor {
    pub id: ConstantId,
    pub value: String,
}

impl ConstantDescriptor {
    pub fn new(id: impl Into<ConstantId>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Persisted shape: field -> ordered constant groups.
pub type ConstantMappings = IndexMap<FieldId, Vec<ConstantGroup>>;

/// Editable shape: field -> raw value -> constant.
pub type FlatValueMapping = IndexMap<FieldId, IndexMap<String, ConstantId>>;
