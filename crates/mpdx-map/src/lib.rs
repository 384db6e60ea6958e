//! Header and value mapping transforms for the MPDX CSV import.
//!
//! Raw values of constant columns (newsletter, status, send appeals, ...) are
//! persisted as groups per canonical constant but edited one raw value at a
//! time. This crate converts between the two shapes and keeps them honest:
//!
//! - every raw value of the file shows up in the editable view
//! - no raw value is ever listed under two constants of a field
//! - `""`, `null` and `"null"` all mean unassigned
//!
//! # Example
//!
//! ```ignore
//! use mpdx_map::{FileContext, constants_mappings_to_value_mappings};
//!
//! let view = constants_mappings_to_value_mappings(
//!     &import.constants_mappings,
//!     Some(FileContext::of(&import)),
//! );
//! ```

pub mod coverage;
pub mod headers;
pub mod reduce;
pub mod transform;

pub use coverage::{FileContext, build_file_constant_values, merge_file_constants, raw_values_for_field};
pub use headers::{
    coerce_boolean_fields, invert_from_wire, invert_to_wire, missing_required_headers,
    seed_from_supported, strip_unmapped,
};
pub use reduce::{build_constant_values, fold_entries, reduce_constants};
pub use transform::{
    constants_mappings_to_value_mappings, ensure_coverage, value_mappings_to_constants_mappings,
};
