use std::fmt;

use crate::ModelError;

/// Destination field key of the import (`first_name`, `send_appeals`, ...).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct FieldId(String);

impl FieldId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidFieldId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Built-in ids, trimmed and non-empty by construction.
    pub(crate) fn from_static(value: &'static str) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Camel-cased key used by the constants endpoint (`send_appeals` -> `sendAppeals`).
    pub fn camel_case(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        for (idx, segment) in self.0.split('_').filter(|s| !s.is_empty()).enumerate() {
            if idx == 0 {
                out.push_str(segment);
                continue;
            }
            let mut chars = segment.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
        out
    }
}

impl TryFrom<String> for FieldId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for FieldId {
    type Error = ModelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FieldId> for String {
    fn from(value: FieldId) -> Self {
        value.0
    }
}

impl AsRef<str> for FieldId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_ids() {
        assert!(FieldId::new("  ").is_err());
        assert_eq!(FieldId::new(" status ").unwrap().as_str(), "status");
    }

    #[test]
    fn camel_cases_snake_ids() {
        let id = FieldId::new("send_appeals").unwrap();
        assert_eq!(id.camel_case(), "sendAppeals");
        let id = FieldId::new("newsletter").unwrap();
        assert_eq!(id.camel_case(), "newsletter");
        let id = FieldId::new("pledge_currency").unwrap();
        assert_eq!(id.camel_case(), "pledgeCurrency");
    }
}
