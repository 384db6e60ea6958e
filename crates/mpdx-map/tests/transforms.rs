//! Integration tests for the constant/value mapping transforms.

use indexmap::IndexMap;
use mpdx_map::{
    FileContext, constants_mappings_to_value_mappings, invert_to_wire, strip_unmapped,
    value_mappings_to_constants_mappings,
};
use mpdx_model::{
    ConstantGroup, ConstantId, ConstantMappings, FieldId, FileHeaderTable, FlatValueMapping,
    HeaderMapping, HeaderTarget, HeaderValues, ImportConfig,
};

fn field(id: &str) -> FieldId {
    FieldId::new(id).unwrap()
}

fn table(entries: &[(&str, &[&str])]) -> FileHeaderTable {
    entries
        .iter()
        .map(|(header, values)| ((*header).to_string(), HeaderValues::from(*values)))
        .collect()
}

fn headers(entries: &[(&str, &str)]) -> HeaderMapping {
    entries
        .iter()
        .map(|(header, target)| ((*header).to_string(), HeaderTarget::Field(field(target))))
        .collect()
}

fn newsletter_file() -> (FileHeaderTable, HeaderMapping) {
    (
        table(&[("send_letter", &["abc", "def", "ghi", "jkl", "mno", "pqr"])]),
        headers(&[("send_letter", "newsletter")]),
    )
}

fn flat(json: &str) -> FlatValueMapping {
    serde_json::from_str(json).unwrap()
}

#[test]
fn constants_to_values_fills_unmapped_file_values() {
    let (file_constants, header_mapping) = newsletter_file();
    let mut mappings = ConstantMappings::new();
    mappings.insert(
        field("newsletter"),
        vec![
            ConstantGroup::with_values("Physical".into(), ["abc", "def"]),
            ConstantGroup::with_values("Both".into(), ["ghi", "jkl"]),
        ],
    );

    let view = constants_mappings_to_value_mappings(
        &mappings,
        Some(FileContext::new(&file_constants, &header_mapping)),
    );

    let expected = flat(
        r#"{"newsletter": {"abc": "Physical", "def": "Physical", "ghi": "Both", "jkl": "Both", "mno": "", "pqr": ""}}"#,
    );
    assert_eq!(view, expected);
}

#[test]
fn constants_to_values_without_file_only_flattens() {
    let mut mappings = ConstantMappings::new();
    mappings.insert(
        field("newsletter"),
        vec![ConstantGroup::with_values("Physical".into(), ["abc"])],
    );

    let view = constants_mappings_to_value_mappings(&mappings, None);
    assert_eq!(view, flat(r#"{"newsletter": {"abc": "Physical"}}"#));
}

#[test]
fn constants_to_values_keeps_field_order() {
    let (file_constants, header_mapping) = newsletter_file();
    let mut mappings = ConstantMappings::new();
    mappings.insert(field("status"), Vec::new());
    mappings.insert(field("newsletter"), Vec::new());

    let view = constants_mappings_to_value_mappings(
        &mappings,
        Some(FileContext::new(&file_constants, &header_mapping)),
    );
    let fields: Vec<&str> = view.keys().map(FieldId::as_str).collect();
    assert_eq!(fields, vec!["status", "newsletter"]);
    assert!(view[&field("status")].is_empty());
    assert_eq!(view[&field("newsletter")].len(), 6);
}

#[test]
fn values_to_constants_recovers_dropped_values() {
    let (file_constants, header_mapping) = newsletter_file();
    let values = flat(
        r#"{"newsletter": {"abc": "Physical", "def": "Physical", "ghi": "Both", "mno": null, "pqr": "null"}}"#,
    );

    let groups = value_mappings_to_constants_mappings(
        &values,
        Some(FileContext::new(&file_constants, &header_mapping)),
        &ImportConfig::default(),
    );

    assert_eq!(
        groups[&field("newsletter")],
        vec![
            ConstantGroup::with_values("Physical".into(), ["abc", "def"]),
            ConstantGroup::with_values("Both".into(), ["ghi"]),
            ConstantGroup::with_values(ConstantId::Unassigned, ["mno", "pqr", "jkl"]),
        ]
    );
    insta::assert_json_snapshot!("newsletter_groups", groups);
}

#[test]
fn values_to_constants_groups_booleans() {
    let file_constants = table(&[("send_appeal", &["bar", "baz"])]);
    let header_mapping = headers(&[("send_appeal", "send_appeals")]);
    let values = flat(r#"{"send_appeals": {"bar": "true", "baz": "false"}}"#);

    let groups = value_mappings_to_constants_mappings(
        &values,
        Some(FileContext::new(&file_constants, &header_mapping)),
        &ImportConfig::default(),
    );

    let mut expected = ConstantMappings::new();
    expected.insert(
        field("send_appeals"),
        vec![
            ConstantGroup::with_values(ConstantId::Bool(true), ["bar"]),
            ConstantGroup::with_values(ConstantId::Bool(false), ["baz"]),
        ],
    );
    assert_eq!(groups, expected);
}

#[test]
fn values_to_constants_without_file_skips_reconciliation() {
    let values = flat(r#"{"newsletter": {"abc": "Physical"}}"#);
    let groups = value_mappings_to_constants_mappings(&values, None, &ImportConfig::default());
    assert_eq!(
        groups[&field("newsletter")],
        vec![ConstantGroup::with_values("Physical".into(), ["abc"])]
    );
}

#[test]
fn null_like_values_share_one_group() {
    let values = flat(r#"{"status": {"a": null, "b": "null", "c": "", "d": "Never Ask"}}"#);
    let groups = value_mappings_to_constants_mappings(&values, None, &ImportConfig::default());
    let status = &groups[&field("status")];
    assert_eq!(status.len(), 2);
    assert_eq!(
        status[0],
        ConstantGroup::with_values(ConstantId::Unassigned, ["a", "b", "c"])
    );
}

#[test]
fn mapped_constant_fields_without_edits_get_a_group_entry() {
    let file_constants = table(&[("letter", &["x", "y"]), ("city", &["Paris"])]);
    let header_mapping = headers(&[("letter", "newsletter"), ("city", "city")]);

    let groups = value_mappings_to_constants_mappings(
        &FlatValueMapping::new(),
        Some(FileContext::new(&file_constants, &header_mapping)),
        &ImportConfig::default(),
    );

    // city has no published constants, so it is not covered.
    assert_eq!(groups.len(), 1);
    assert_eq!(
        groups[&field("newsletter")],
        vec![ConstantGroup::with_values(ConstantId::Unassigned, ["x", "y"])]
    );
}

#[test]
fn transforms_leave_their_input_untouched() {
    let (file_constants, header_mapping) = newsletter_file();
    let values = flat(r#"{"newsletter": {"abc": "Physical"}}"#);
    let before = values.clone();
    let _ = value_mappings_to_constants_mappings(
        &values,
        Some(FileContext::new(&file_constants, &header_mapping)),
        &ImportConfig::default(),
    );
    assert_eq!(values, before);
}

#[test]
fn stripped_mapping_inverts_to_field_first() {
    let mapping: HeaderMapping =
        serde_json::from_str(r#"{"a": -1, "b": -1, "c": "send_appeals"}"#).unwrap();

    let wire = invert_to_wire(&strip_unmapped(&mapping));

    let mut expected = IndexMap::new();
    expected.insert(field("send_appeals"), "c".to_string());
    assert_eq!(wire, expected);
}
