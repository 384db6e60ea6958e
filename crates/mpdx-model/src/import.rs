//! Snapshot of one CSV import as held by the wizard.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::header::header_for_field;
use crate::{
    ConstantId, ConstantMappings, FieldId, FileHeaderTable, FlatValueMapping, HeaderMapping,
    HeaderTarget, ModelError,
};

/// One uploaded CSV file with its mappings.
///
/// `header_mapping` is header -> field here; the API stores the inverse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvImport {
    pub id: String,
    pub file_name: Option<String>,
    /// Raw header -> header as displayed in the file.
    pub file_headers: IndexMap<String, String>,
    pub file_constants: FileHeaderTable,
    pub header_mapping: HeaderMapping,
    pub constants_mappings: ConstantMappings,
    /// Editable view derived from `constants_mappings`.
    pub value_mappings: FlatValueMapping,
    /// Preview rows, raw header -> cell.
    pub sample: Vec<IndexMap<String, Option<String>>>,
    pub tag_list: Vec<String>,
    pub in_preview: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CsvImport {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn header_for(&self, field: &FieldId) -> Option<&str> {
        header_for_field(&self.header_mapping, field)
    }

    pub fn has_value_mappings(&self) -> bool {
        !self.value_mappings.is_empty()
    }

    /// Point `header` at `target`. The header must exist in the uploaded file.
    pub fn set_header(&mut self, header: &str, target: HeaderTarget) -> Result<(), ModelError> {
        if !self.file_headers.contains_key(header) && !self.header_mapping.contains_key(header) {
            return Err(ModelError::UnknownHeader(header.to_string()));
        }
        self.header_mapping.insert(header.to_string(), target);
        Ok(())
    }

    /// Map one raw value of `field` to `constant` in the editable view.
    pub fn set_value(
        &mut self,
        field: &FieldId,
        raw_value: &str,
        constant: ConstantId,
    ) -> Result<(), ModelError> {
        if self.header_for(field).is_none() {
            return Err(ModelError::UnmappedField(field.clone()));
        }
        self.value_mappings
            .entry(field.clone())
            .or_default()
            .insert(raw_value.to_string(), constant);
        Ok(())
    }

    /// Tag list as sent to the API.
    pub fn joined_tags(&self) -> String {
        self.tag_list.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(id: &str) -> FieldId {
        FieldId::new(id).unwrap()
    }

    fn import() -> CsvImport {
        let mut import = CsvImport::new("file-1");
        import
            .file_headers
            .insert("fname".to_string(), "First Name".to_string());
        import
            .file_headers
            .insert("letter".to_string(), "Letter".to_string());
        import
    }

    #[test]
    fn set_header_requires_known_header() {
        let mut import = import();
        assert!(
            import
                .set_header("fname", field("first_name").into())
                .is_ok()
        );
        assert_eq!(
            import.set_header("nope", HeaderTarget::Unmapped),
            Err(ModelError::UnknownHeader("nope".to_string()))
        );
    }

    #[test]
    fn set_value_requires_mapped_field() {
        let mut import = import();
        let newsletter = field("newsletter");
        assert!(
            import
                .set_value(&newsletter, "abc", "Physical".into())
                .is_err()
        );
        import.set_header("letter", newsletter.clone().into()).unwrap();
        import
            .set_value(&newsletter, "abc", "Physical".into())
            .unwrap();
        assert_eq!(
            import.value_mappings[&newsletter]["abc"],
            ConstantId::Value("Physical".to_string())
        );
    }
}
