//! The two public transforms between persisted constant groups and the
//! editable flat value mapping.

use std::collections::HashSet;

use indexmap::IndexMap;
use mpdx_model::{
    ConstantGroup, ConstantId, ConstantMappings, FlatValueMapping, HeaderMapping, HeaderTarget,
    ImportConfig,
};

use crate::coverage::{FileContext, build_file_constant_values, merge_file_constants};
use crate::reduce::build_constant_values;

/// Groups -> editable view.
///
/// Without a file context only the groups themselves are flattened; with one,
/// every raw value of the mapped column is present, unassigned if no group
/// lists it. Field order follows `mappings`.
pub fn constants_mappings_to_value_mappings(
    mappings: &ConstantMappings,
    ctx: Option<FileContext<'_>>,
) -> FlatValueMapping {
    let resolved = build_constant_values(mappings);
    let Some(ctx) = ctx else {
        return resolved;
    };

    let gaps = build_file_constant_values(mappings.keys(), ctx);
    let view: FlatValueMapping = resolved
        .into_iter()
        .map(|(field, values)| {
            let merged = merge_file_constants(values, gaps.get(&field));
            (field, merged)
        })
        .collect();

    tracing::debug!(fields = view.len(), "built value mapping view");
    view
}

/// Editable view -> groups, as the API stores them.
///
/// Fields mapped to a header that have published constants always get an
/// entry, even with no edits. With a file context, raw values of the column
/// that the view lost are folded into the unassigned group.
pub fn value_mappings_to_constants_mappings(
    value_mappings: &FlatValueMapping,
    ctx: Option<FileContext<'_>>,
    config: &ImportConfig,
) -> ConstantMappings {
    let covered = match ctx {
        Some(ctx) => ensure_coverage(value_mappings, ctx.header_mapping, config),
        None => value_mappings.clone(),
    };

    let mappings: ConstantMappings = covered
        .iter()
        .map(|(field, values)| {
            let mut groups = group_values(values);
            if let Some(ctx) = ctx {
                reconcile_unmapped(&mut groups, &ctx.raw_values(field));
            }
            (field.clone(), groups)
        })
        .collect();

    tracing::debug!(fields = mappings.len(), "built constant groups");
    mappings
}

/// Copy of `value_mappings` with an empty entry for every mapped field that
/// has published constants.
pub fn ensure_coverage(
    value_mappings: &FlatValueMapping,
    header_mapping: &HeaderMapping,
    config: &ImportConfig,
) -> FlatValueMapping {
    let mut covered = value_mappings.clone();
    for field in header_mapping.values().filter_map(HeaderTarget::field) {
        if config.has_constants(field) && !covered.contains_key(field) {
            tracing::trace!(%field, "adding empty value mapping");
            covered.insert(field.clone(), IndexMap::new());
        }
    }
    covered
}

/// Step 1: bucket raw values by constant, groups in first-seen order.
fn group_values(values: &IndexMap<String, ConstantId>) -> Vec<ConstantGroup> {
    let mut groups: Vec<ConstantGroup> = Vec::new();
    for (raw, constant) in values {
        match groups.iter_mut().find(|group| group.id == *constant) {
            Some(group) => group.values.push(raw.clone()),
            None => groups.push(ConstantGroup::with_values(constant.clone(), [raw.clone()])),
        }
    }
    groups
}

/// Step 2: raw values no group lists go to the unassigned group.
fn reconcile_unmapped(groups: &mut Vec<ConstantGroup>, file_values: &[&str]) {
    let mut seen: HashSet<String> = groups
        .iter()
        .flat_map(|group| group.values.iter().cloned())
        .collect();
    let missing: Vec<String> = file_values
        .iter()
        .filter(|raw| seen.insert((**raw).to_string()))
        .map(|raw| (*raw).to_string())
        .collect();
    if missing.is_empty() {
        return;
    }

    let index = match groups.iter().position(|group| group.id.is_unassigned()) {
        Some(index) => index,
        None => {
            groups.push(ConstantGroup::new(ConstantId::Unassigned));
            groups.len() - 1
        }
    };
    groups[index].values.extend(missing);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_follow_first_appearance() {
        let mut values = IndexMap::new();
        values.insert("a".to_string(), ConstantId::from("Both"));
        values.insert("b".to_string(), ConstantId::Unassigned);
        values.insert("c".to_string(), ConstantId::from("Both"));
        let groups = group_values(&values);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].values, vec!["a", "c"]);
        assert!(groups[1].id.is_unassigned());
    }

    #[test]
    fn reconcile_appends_to_existing_unassigned_group() {
        let mut groups = vec![
            ConstantGroup::with_values(ConstantId::Unassigned, ["x"]),
            ConstantGroup::with_values("Both".into(), ["y"]),
        ];
        reconcile_unmapped(&mut groups, &["x", "y", "z", "z"]);
        assert_eq!(groups[0].values, vec!["x", "z"]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn reconcile_leaves_complete_groups_alone() {
        let mut groups = vec![ConstantGroup::with_values("Both".into(), ["y"])];
        reconcile_unmapped(&mut groups, &["y"]);
        assert_eq!(groups.len(), 1);
    }
}
