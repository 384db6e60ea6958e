//! Folding constant groups into per-value lookups.

use indexmap::IndexMap;
use mpdx_model::{ConstantGroup, ConstantId, ConstantMappings, FlatValueMapping};

/// Fold over key/value pairs.
pub fn fold_entries<K, V, I, A, F>(entries: I, init: A, mut f: F) -> A
where
    I: IntoIterator<Item = (K, V)>,
    F: FnMut(A, K, V) -> A,
{
    entries
        .into_iter()
        .fold(init, |acc, (key, value)| f(acc, key, value))
}

/// Flatten one field's groups into `raw value -> constant`.
///
/// A raw value listed in several groups keeps the id of the last one. That
/// only happens with malformed server data and is logged.
pub fn reduce_constants(groups: &[ConstantGroup]) -> IndexMap<String, ConstantId> {
    fold_entries(
        groups.iter().map(|group| (&group.id, &group.values)),
        IndexMap::new(),
        |mut acc, id, values| {
            for value in values {
                if let Some(previous) = acc.insert(value.clone(), id.clone())
                    && previous != *id
                {
                    tracing::warn!(
                        raw_value = %value,
                        previous = %previous,
                        replacement = %id,
                        "raw value listed under several constants"
                    );
                }
            }
            acc
        },
    )
}

/// [`reduce_constants`] for every field, keeping field order.
pub fn build_constant_values(mappings: &ConstantMappings) -> FlatValueMapping {
    fold_entries(mappings, FlatValueMapping::new(), |mut acc, field, groups| {
        acc.insert(field.clone(), reduce_constants(groups));
        acc
    })
}
