//! JSON:API wire types for `imports/csv`.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use mpdx_model::{ConstantMappings, FieldId, FileHeaderTable};
use serde::{Deserialize, Serialize};

/// JSON:API resource type of a CSV import.
pub const IMPORT_TYPE: &str = "imports";

/// Top-level response document.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportDocument {
    pub data: ImportResource,
}

/// One import resource as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportResource {
    pub id: String,

    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub attributes: ImportAttributes,
}

/// Server attributes of an import.
///
/// Every field tolerates `null` and absence; the API omits most of them
/// until the file has been parsed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImportAttributes {
    pub file_name: Option<String>,

    /// Raw header -> display header.
    pub file_headers: Option<IndexMap<String, String>>,

    /// Raw header -> distinct values sampled from that column.
    pub file_constants: Option<FileHeaderTable>,

    /// Field -> raw header.
    pub file_headers_mappings: Option<IndexMap<FieldId, String>>,

    pub file_constants_mappings: Option<ConstantMappings>,

    pub sample: Option<Vec<IndexMap<String, serde_json::Value>>>,

    pub tag_list: Option<Vec<String>>,

    pub in_preview: Option<bool>,

    pub created_at: Option<DateTime<Utc>>,

    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of an update request.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateDocument {
    pub data: UpdateResource,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateResource {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: &'static str,

    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl UpdateDocument {
    pub fn new(id: impl Into<String>, attributes: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            data: UpdateResource {
                id: id.into(),
                kind: IMPORT_TYPE,
                attributes,
            },
        }
    }
}
