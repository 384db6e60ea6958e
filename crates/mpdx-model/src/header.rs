//! Raw CSV headers, their sampled values, and where each header is mapped.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::FieldId;

/// Destination of a raw CSV header.
///
/// The API writes "not imported" as `-1`; it is kept on the wire only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HeaderTarget {
    Field(FieldId),
    Unmapped,
}

impl HeaderTarget {
    pub fn field(&self) -> Option<&FieldId> {
        match self {
            Self::Field(field) => Some(field),
            Self::Unmapped => None,
        }
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, Self::Field(_))
    }

    pub fn is_field(&self, field: &FieldId) -> bool {
        self.field() == Some(field)
    }
}

impl From<FieldId> for HeaderTarget {
    fn from(value: FieldId) -> Self {
        Self::Field(value)
    }
}

impl From<Option<FieldId>> for HeaderTarget {
    fn from(value: Option<FieldId>) -> Self {
        value.map_or(Self::Unmapped, Self::Field)
    }
}

impl fmt::Display for HeaderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => write!(f, "{field}"),
            Self::Unmapped => f.write_str("-"),
        }
    }
}

impl Serialize for HeaderTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Field(field) => serializer.serialize_str(field.as_str()),
            Self::Unmapped => serializer.serialize_i64(-1),
        }
    }
}

struct HeaderTargetVisitor;

impl<'de> Visitor<'de> for HeaderTargetVisitor {
    type Value = HeaderTarget;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a field id, -1 or null")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        match value.trim() {
            "" | "-1" => Ok(HeaderTarget::Unmapped),
            field => FieldId::new(field)
                .map(HeaderTarget::Field)
                .map_err(E::custom),
        }
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        if value == -1 {
            Ok(HeaderTarget::Unmapped)
        } else {
            Err(E::invalid_value(de::Unexpected::Signed(value), &self))
        }
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Err(E::invalid_value(de::Unexpected::Unsigned(value), &self))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(HeaderTarget::Unmapped)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(HeaderTarget::Unmapped)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Deserialize<'de> for HeaderTarget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(HeaderTargetVisitor)
    }
}

/// Raw header -> target, in the user's (header-first) orientation.
pub type HeaderMapping = IndexMap<String, HeaderTarget>;

/// Values observed for one CSV column at upload time.
///
/// `null` cells are dropped and a `null` column reads as an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HeaderValues {
    /// Every distinct raw value of a constant column.
    List(Vec<String>),
    /// A single sample value.
    Scalar(String),
}

impl HeaderValues {
    /// Raw values of the column; a scalar sample counts as one value.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Self::List(values) => values,
            Self::Scalar(value) => std::slice::from_ref(value),
        };
        slice.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        match self {
            Self::List(values) => values.len(),
            Self::Scalar(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct HeaderValuesVisitor;

impl<'de> Visitor<'de> for HeaderValuesVisitor {
    type Value = HeaderValues;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a list of values, a single value or null")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(HeaderValues::Scalar(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(HeaderValues::Scalar(value))
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element::<Option<String>>()? {
            values.extend(value);
        }
        Ok(HeaderValues::List(values))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(HeaderValues::List(Vec::new()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(HeaderValues::List(Vec::new()))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Deserialize<'de> for HeaderValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(HeaderValuesVisitor)
    }
}

impl From<Vec<String>> for HeaderValues {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<&[&str]> for HeaderValues {
    fn from(value: &[&str]) -> Self {
        Self::List(value.iter().map(|v| (*v).to_string()).collect())
    }
}

/// Raw header -> observed values. Immutable snapshot taken at upload time.
pub type FileHeaderTable = IndexMap<String, HeaderValues>;

/// Header of `mapping` whose target is `field`, first match wins.
pub fn header_for_field<'a>(mapping: &'a HeaderMapping, field: &FieldId) -> Option<&'a str> {
    mapping
        .iter()
        .find(|(_, target)| target.is_field(field))
        .map(|(header, _)| header.as_str())
}
