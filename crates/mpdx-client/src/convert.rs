//! Conversion between API resources and editable snapshots.

use mpdx_map::{
    FileContext, constants_mappings_to_value_mappings, invert_from_wire, invert_to_wire,
    seed_from_supported,
};
use mpdx_model::{CsvImport, ImportConfig};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::types::ImportResource;

/// Attributes the wizard edits and sends back on update.
pub const EDITABLE_ATTRIBUTES: [&str; 4] = [
    "file_headers_mappings",
    "file_constants_mappings",
    "tag_list",
    "in_preview",
];

/// Build the editable snapshot from a server resource.
///
/// The header mapping is turned back to header -> field and seeded from the
/// supported headers when the server has none yet. The value view is
/// recomputed from the canonical constants mappings.
pub fn import_from_resource(resource: ImportResource, config: &ImportConfig) -> CsvImport {
    let ImportResource { id, attributes, .. } = resource;

    let file_headers = attributes.file_headers.unwrap_or_default();
    let file_constants = attributes.file_constants.unwrap_or_default();

    let mut header_mapping =
        invert_from_wire(&attributes.file_headers_mappings.unwrap_or_default());
    if header_mapping.is_empty() {
        header_mapping = seed_from_supported(&file_headers, config);
    }

    let constants_mappings = attributes.file_constants_mappings.unwrap_or_default();
    let value_mappings = constants_mappings_to_value_mappings(
        &constants_mappings,
        Some(FileContext::new(&file_constants, &header_mapping)),
    );

    let sample = attributes
        .sample
        .unwrap_or_default()
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|(header, cell)| (header, sample_cell(cell)))
                .collect()
        })
        .collect();

    CsvImport {
        id,
        file_name: attributes.file_name,
        file_headers,
        file_constants,
        header_mapping,
        constants_mappings,
        value_mappings,
        sample,
        tag_list: attributes.tag_list.unwrap_or_default(),
        in_preview: attributes.in_preview.unwrap_or(false),
        created_at: attributes.created_at,
        updated_at: attributes.updated_at,
    }
}

fn sample_cell(cell: Value) -> Option<String> {
    match cell {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

/// Editable attributes of `import` in wire shape.
pub fn wire_attributes(import: &CsvImport) -> Result<Map<String, Value>> {
    let mut attributes = Map::new();
    attributes.insert(
        "file_headers_mappings".to_string(),
        serde_json::to_value(invert_to_wire(&import.header_mapping))?,
    );
    attributes.insert(
        "file_constants_mappings".to_string(),
        serde_json::to_value(&import.constants_mappings)?,
    );
    attributes.insert("tag_list".to_string(), Value::String(import.joined_tags()));
    attributes.insert("in_preview".to_string(), Value::Bool(import.in_preview));
    Ok(attributes)
}

/// Names of the editable attributes that differ between two snapshots.
pub fn changed_attributes(initial: &CsvImport, upload: &CsvImport) -> Result<Vec<&'static str>> {
    let before = wire_attributes(initial)?;
    let after = wire_attributes(upload)?;
    Ok(EDITABLE_ATTRIBUTES
        .into_iter()
        .filter(|name| before.get(*name) != after.get(*name))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImportDocument;
    use mpdx_model::{ConstantId, FieldId, HeaderTarget};

    fn field(id: &str) -> FieldId {
        FieldId::new(id).unwrap()
    }

    fn resource(json: serde_json::Value) -> ImportResource {
        serde_json::from_value::<ImportDocument>(json).unwrap().data
    }

    #[test]
    fn rebuilds_editable_view() {
        let import = import_from_resource(
            resource(serde_json::json!({
                "data": {
                    "id": "file-1",
                    "type": "imports",
                    "attributes": {
                        "file_headers": {"fname": "First", "letter": "Letter"},
                        "file_constants": {"letter": ["a", "b"]},
                        "file_headers_mappings": {"first_name": "fname", "newsletter": "letter"},
                        "file_constants_mappings": {
                            "newsletter": [{"id": "Both", "values": ["a"]}]
                        },
                        "sample": [{"fname": "Ann", "letter": null, "age": 7}],
                        "tag_list": null,
                        "in_preview": true
                    }
                }
            })),
            &ImportConfig::default(),
        );

        assert_eq!(import.id, "file-1");
        assert_eq!(
            import.header_mapping["letter"],
            HeaderTarget::Field(field("newsletter"))
        );
        let letter = &import.value_mappings[&field("newsletter")];
        assert_eq!(letter["a"], ConstantId::Value("Both".to_string()));
        assert_eq!(letter["b"], ConstantId::Unassigned);
        assert!(import.tag_list.is_empty());
        assert_eq!(import.sample[0]["letter"], None);
        assert_eq!(import.sample[0]["age"].as_deref(), Some("7"));
        assert!(import.in_preview);
    }

    #[test]
    fn seeds_mapping_when_server_has_none() {
        let import = import_from_resource(
            resource(serde_json::json!({
                "data": {
                    "id": "file-2",
                    "type": "imports",
                    "attributes": {
                        "file_headers": {"first_name": "First Name", "x": "Last Name"},
                        "file_headers_mappings": {}
                    }
                }
            })),
            &ImportConfig::default(),
        );
        assert_eq!(import.header_mapping.len(), 2);
        assert_eq!(import.header_mapping["x"], HeaderTarget::Field(field("last_name")));
    }

    #[test]
    fn wire_attributes_use_server_orientation() {
        let mut import = CsvImport::new("file-3");
        import.file_headers.insert("c".to_string(), "C".to_string());
        import.header_mapping.insert("a".to_string(), HeaderTarget::Unmapped);
        import
            .header_mapping
            .insert("c".to_string(), HeaderTarget::Field(field("send_appeals")));
        import.tag_list = vec!["fall".to_string(), "2026".to_string()];

        let attributes = wire_attributes(&import).unwrap();
        assert_eq!(
            attributes["file_headers_mappings"],
            serde_json::json!({"send_appeals": "c"})
        );
        assert_eq!(attributes["tag_list"], serde_json::json!("fall,2026"));
    }

    #[test]
    fn lists_changed_attributes() {
        let initial = CsvImport::new("file-4");
        let mut upload = initial.clone();
        upload.in_preview = !initial.in_preview;
        assert_eq!(changed_attributes(&initial, &upload).unwrap(), vec!["in_preview"]);
    }
}
