//! Header mapping helpers used around persistence.
//!
//! The wizard keeps header -> field; the API stores field -> header and has
//! no notion of an unmapped header.

use indexmap::IndexMap;
use mpdx_model::{ConstantId, FieldId, FlatValueMapping, HeaderMapping, HeaderTarget, ImportConfig};

/// Drop headers that are not imported.
pub fn strip_unmapped(mapping: &HeaderMapping) -> HeaderMapping {
    mapping
        .iter()
        .filter(|(_, target)| target.is_mapped())
        .map(|(header, target)| (header.clone(), target.clone()))
        .collect()
}

/// header -> field into field -> header. Unmapped headers are skipped; when
/// two headers share a field the first one is kept.
pub fn invert_to_wire(mapping: &HeaderMapping) -> IndexMap<FieldId, String> {
    let mut wire = IndexMap::new();
    for (header, target) in mapping {
        let Some(field) = target.field() else {
            continue;
        };
        if wire.contains_key(field) {
            tracing::debug!(%field, %header, "field already mapped, header ignored");
            continue;
        }
        wire.insert(field.clone(), header.clone());
    }
    wire
}

/// field -> header back into header -> field.
pub fn invert_from_wire(wire: &IndexMap<FieldId, String>) -> HeaderMapping {
    wire.iter()
        .map(|(field, header)| (header.clone(), HeaderTarget::Field(field.clone())))
        .collect()
}

/// Guess a header mapping for a fresh upload: a raw header maps to the
/// supported field with the same key, or with the same label ignoring case.
pub fn seed_from_supported(
    file_headers: &IndexMap<String, String>,
    config: &ImportConfig,
) -> HeaderMapping {
    let mut seeded = HeaderMapping::new();
    for (header, display) in file_headers {
        let by_key = FieldId::new(header.as_str())
            .ok()
            .filter(|field| config.is_supported(field));
        let field = by_key.or_else(|| {
            config
                .supported_headers
                .iter()
                .find(|(_, label)| label.eq_ignore_ascii_case(display.trim()))
                .map(|(field, _)| field.clone())
        });
        if let Some(field) = field {
            seeded.insert(header.clone(), HeaderTarget::Field(field));
        }
    }
    tracing::debug!(
        headers = file_headers.len(),
        seeded = seeded.len(),
        "seeded header mapping from supported headers"
    );
    seeded
}

/// Required fields no header points at, in config order.
pub fn missing_required_headers(mapping: &HeaderMapping, config: &ImportConfig) -> Vec<FieldId> {
    config
        .required_headers
        .iter()
        .filter(|field| !mapping.values().any(|target| target.is_field(field)))
        .cloned()
        .collect()
}

/// Coerce `"TRUE"`/`"False"`-style constants to booleans on fields whose
/// published constants are all booleans.
pub fn coerce_boolean_fields(
    value_mappings: &FlatValueMapping,
    config: &ImportConfig,
) -> FlatValueMapping {
    value_mappings
        .iter()
        .map(|(field, values)| {
            if !config.is_boolean_field(field) {
                return (field.clone(), values.clone());
            }
            let coerced = values
                .iter()
                .map(|(raw, constant)| (raw.clone(), coerce_boolean(constant)))
                .collect();
            (field.clone(), coerced)
        })
        .collect()
}

fn coerce_boolean(constant: &ConstantId) -> ConstantId {
    match constant {
        ConstantId::Value(value) if value.trim().eq_ignore_ascii_case("true") => {
            ConstantId::Bool(true)
        }
        ConstantId::Value(value) if value.trim().eq_ignore_ascii_case("false") => {
            ConstantId::Bool(false)
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(id: &str) -> FieldId {
        FieldId::new(id).unwrap()
    }

    #[test]
    fn inversion_round_trips_mapped_headers() {
        let mut mapping = HeaderMapping::new();
        mapping.insert("fname".to_string(), field("first_name").into());
        mapping.insert("junk".to_string(), HeaderTarget::Unmapped);
        mapping.insert("lname".to_string(), field("last_name").into());

        let wire = invert_to_wire(&mapping);
        assert_eq!(wire.len(), 2);
        assert_eq!(wire[&field("first_name")], "fname");
        assert_eq!(invert_from_wire(&wire), strip_unmapped(&mapping));
    }

    #[test]
    fn first_header_wins_on_shared_field() {
        let mut mapping = HeaderMapping::new();
        mapping.insert("a".to_string(), field("city").into());
        mapping.insert("b".to_string(), field("city").into());
        assert_eq!(invert_to_wire(&mapping)[&field("city")], "a");
    }

    #[test]
    fn seeds_by_key_and_label() {
        let config = ImportConfig::default();
        let mut headers = IndexMap::new();
        headers.insert("first_name".to_string(), "First".to_string());
        headers.insert("col_7".to_string(), "last name".to_string());
        headers.insert("favourite_colour".to_string(), "Colour".to_string());

        let seeded = seed_from_supported(&headers, &config);
        assert_eq!(seeded.len(), 2);
        assert_eq!(seeded["first_name"], HeaderTarget::Field(field("first_name")));
        assert_eq!(seeded["col_7"], HeaderTarget::Field(field("last_name")));
    }

    #[test]
    fn reports_missing_required_headers() {
        let config = ImportConfig::default();
        let mut mapping = HeaderMapping::new();
        mapping.insert("fname".to_string(), field("first_name").into());
        assert_eq!(
            missing_required_headers(&mapping, &config),
            vec![field("last_name")]
        );
    }

    #[test]
    fn coerces_only_boolean_fields() {
        let config = ImportConfig::default();
        let mut values = FlatValueMapping::new();
        values
            .entry(field("send_appeals"))
            .or_default()
            .insert("y".to_string(), ConstantId::Value("TRUE".to_string()));
        values
            .entry(field("newsletter"))
            .or_default()
            .insert("n".to_string(), ConstantId::Value("TRUE".to_string()));

        let coerced = coerce_boolean_fields(&values, &config);
        assert_eq!(coerced[&field("send_appeals")]["y"], ConstantId::Bool(true));
        assert_eq!(
            coerced[&field("newsletter")]["n"],
            ConstantId::Value("TRUE".to_string())
        );
    }
}
