//! Property tests: coverage, disjointness and round-trip membership.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use mpdx_map::{
    FileContext, constants_mappings_to_value_mappings, value_mappings_to_constants_mappings,
};
use mpdx_model::{
    ConstantGroup, ConstantId, ConstantMappings, FieldId, FileHeaderTable, HeaderMapping,
    HeaderTarget, HeaderValues, ImportConfig,
};
use proptest::prelude::*;

const CONSTANTS: [&str; 4] = ["", "Physical", "Email", "Both"];

#[derive(Debug)]
struct Fixture {
    file_constants: FileHeaderTable,
    header_mapping: HeaderMapping,
    mappings: ConstantMappings,
    raw_values: Vec<String>,
}

fn newsletter() -> FieldId {
    FieldId::new("newsletter").unwrap()
}

/// Distinct raw values, each assigned to one constant; `grouped` controls
/// how many of them are listed in groups at all.
fn fixture() -> impl Strategy<Value = Fixture> {
    prop::collection::hash_set("[a-z]{1,6}", 0..24)
        .prop_flat_map(|values| {
            let values: Vec<String> = values.into_iter().collect();
            let len = values.len();
            (
                Just(values),
                prop::collection::vec(0..CONSTANTS.len(), len),
                0..=len,
            )
        })
        .prop_map(|(raw_values, choices, grouped)| {
            let mut groups: Vec<ConstantGroup> = Vec::new();
            for (raw, choice) in raw_values.iter().zip(&choices).take(grouped) {
                let id = ConstantId::from(CONSTANTS[*choice]);
                match groups.iter_mut().find(|group| group.id == id) {
                    Some(group) => group.values.push(raw.clone()),
                    None => groups.push(ConstantGroup::with_values(id, [raw.clone()])),
                }
            }
            let mut mappings = ConstantMappings::new();
            mappings.insert(newsletter(), groups);

            let mut file_constants = FileHeaderTable::new();
            file_constants.insert(
                "letter".to_string(),
                HeaderValues::List(raw_values.clone()),
            );
            let mut header_mapping = HeaderMapping::new();
            header_mapping.insert("letter".to_string(), HeaderTarget::Field(newsletter()));

            Fixture {
                file_constants,
                header_mapping,
                mappings,
                raw_values,
            }
        })
}

fn membership(groups: &[ConstantGroup]) -> BTreeMap<String, BTreeSet<String>> {
    let mut out: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for group in groups {
        out.entry(group.id.display_value())
            .or_default()
            .extend(group.values.iter().cloned());
    }
    out.retain(|_, values| !values.is_empty());
    out
}

proptest! {
    #[test]
    fn every_file_value_is_in_the_view(fixture in fixture()) {
        let ctx = FileContext::new(&fixture.file_constants, &fixture.header_mapping);
        let view = constants_mappings_to_value_mappings(&fixture.mappings, Some(ctx));
        let values = &view[&newsletter()];
        for raw in &fixture.raw_values {
            prop_assert!(values.contains_key(raw));
        }
    }

    #[test]
    fn groups_never_share_a_value(fixture in fixture()) {
        let ctx = FileContext::new(&fixture.file_constants, &fixture.header_mapping);
        let view = constants_mappings_to_value_mappings(&fixture.mappings, Some(ctx));
        let groups =
            value_mappings_to_constants_mappings(&view, Some(ctx), &ImportConfig::default());

        let mut seen = HashSet::new();
        for group in &groups[&newsletter()] {
            for raw in &group.values {
                prop_assert!(seen.insert(raw.clone()), "{raw} listed twice");
            }
        }
        prop_assert_eq!(seen.len(), fixture.raw_values.len());
    }

    #[test]
    fn round_trip_preserves_membership(fixture in fixture()) {
        let ctx = FileContext::new(&fixture.file_constants, &fixture.header_mapping);
        let view = constants_mappings_to_value_mappings(&fixture.mappings, Some(ctx));
        let groups =
            value_mappings_to_constants_mappings(&view, Some(ctx), &ImportConfig::default());

        // Values the input never grouped land in the unassigned bucket.
        let mut expected = membership(&fixture.mappings[&newsletter()]);
        let grouped: HashSet<&String> =
            expected.values().flat_map(|values| values.iter()).collect();
        let ungrouped: Vec<String> = fixture
            .raw_values
            .iter()
            .filter(|raw| !grouped.contains(raw))
            .cloned()
            .collect();
        if !ungrouped.is_empty() {
            expected.entry(String::new()).or_default().extend(ungrouped);
        }

        prop_assert_eq!(membership(&groups[&newsletter()]), expected);
    }
}
