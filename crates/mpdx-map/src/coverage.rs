//! Gap filling: every raw value found in the file must show up in the
//! editable view, unassigned when no group claims it.

use indexmap::IndexMap;
use mpdx_model::{
    ConstantId, CsvImport, FieldId, FileHeaderTable, FlatValueMapping, HeaderMapping,
    header_for_field,
};

/// Uploaded file data needed to find the raw values of a field.
#[derive(Debug, Clone, Copy)]
pub struct FileContext<'a> {
    pub file_constants: &'a FileHeaderTable,
    pub header_mapping: &'a HeaderMapping,
}

impl<'a> FileContext<'a> {
    pub fn new(file_constants: &'a FileHeaderTable, header_mapping: &'a HeaderMapping) -> Self {
        Self {
            file_constants,
            header_mapping,
        }
    }

    pub fn of(import: &'a CsvImport) -> Self {
        Self::new(&import.file_constants, &import.header_mapping)
    }

    /// Raw values in the file column mapped to `field`, in file order.
    pub fn raw_values(&self, field: &FieldId) -> Vec<&'a str> {
        raw_values_for_field(self.file_constants, self.header_mapping, field)
    }
}

/// Reverse-lookup the header mapped to `field` and return its raw values.
pub fn raw_values_for_field<'a>(
    file_constants: &'a FileHeaderTable,
    header_mapping: &HeaderMapping,
    field: &FieldId,
) -> Vec<&'a str> {
    header_for_field(header_mapping, field)
        .and_then(|header| file_constants.get(header))
        .map(|values| values.values().collect())
        .unwrap_or_default()
}

/// Every raw file value of each field in `fields`, all unassigned.
pub fn build_file_constant_values<'f, I>(fields: I, ctx: FileContext<'_>) -> FlatValueMapping
where
    I: IntoIterator<Item = &'f FieldId>,
{
    fields
        .into_iter()
        .map(|field| {
            let values = ctx
                .raw_values(field)
                .into_iter()
                .map(|raw| (raw.to_string(), ConstantId::Unassigned))
                .collect();
            (field.clone(), values)
        })
        .collect()
}

/// Merge `gaps` beneath `resolved`: resolved entries are never overwritten.
pub fn merge_file_constants(
    mut resolved: IndexMap<String, ConstantId>,
    gaps: Option<&IndexMap<String, ConstantId>>,
) -> IndexMap<String, ConstantId> {
    for (raw, constant) in gaps.into_iter().flatten() {
        resolved
            .entry(raw.clone())
            .or_insert_with(|| constant.clone());
    }
    resolved
}

#[cfg(test)]
mod tests {
    use mpdx_model::{HeaderTarget, HeaderValues};

    use super::*;

    fn fixture() -> (FileHeaderTable, HeaderMapping, FieldId) {
        let newsletter = FieldId::new("newsletter").unwrap();
        let mut table = FileHeaderTable::new();
        table.insert(
            "send_letter".to_string(),
            HeaderValues::from(&["abc", "def"][..]),
        );
        let mut mapping = HeaderMapping::new();
        mapping.insert("send_letter".to_string(), HeaderTarget::Field(newsletter.clone()));
        (table, mapping, newsletter)
    }

    #[test]
    fn finds_raw_values_through_header_mapping() {
        let (table, mapping, newsletter) = fixture();
        assert_eq!(
            raw_values_for_field(&table, &mapping, &newsletter),
            vec!["abc", "def"]
        );
        let other = FieldId::new("status").unwrap();
        assert!(raw_values_for_field(&table, &mapping, &other).is_empty());
    }

    #[test]
    fn merge_keeps_resolved_values() {
        let mut resolved = IndexMap::new();
        resolved.insert("abc".to_string(), ConstantId::from("Physical"));
        let mut gaps = IndexMap::new();
        gaps.insert("abc".to_string(), ConstantId::Unassigned);
        gaps.insert("def".to_string(), ConstantId::Unassigned);

        let merged = merge_file_constants(resolved, Some(&gaps));
        assert_eq!(merged["abc"], ConstantId::from("Physical"));
        assert_eq!(merged["def"], ConstantId::Unassigned);
    }

    #[test]
    fn file_values_default_to_unassigned() {
        let (table, mapping, newsletter) = fixture();
        let gaps = build_file_constant_values([&newsletter], FileContext::new(&table, &mapping));
        assert!(gaps[&newsletter].values().all(ConstantId::is_unassigned));
        assert_eq!(gaps[&newsletter].len(), 2);
    }
}
