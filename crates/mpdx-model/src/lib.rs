//! Data model for the MPDX CSV import wizard.
//!
//! - [`header`]: raw headers, their sampled values, and header targets
//! - [`constant`]: constant ids and the grouped/flat value mapping shapes
//! - [`import`]: the [`CsvImport`] snapshot exchanged with the API
//! - [`config`]: supported headers and published constants
//! - [`step`]: wizard steps

pub mod config;
pub mod constant;
pub mod error;
pub mod header;
pub mod ids;
pub mod import;
pub mod step;

pub use config::ImportConfig;
pub use constant::{ConstantDescriptor, ConstantGroup, ConstantId, ConstantMappings, FlatValueMapping};
pub use error::{ModelError, Result};
pub use header::{FileHeaderTable, HeaderMapping, HeaderTarget, HeaderValues, header_for_field};
pub use ids::FieldId;
pub use import::CsvImport;
pub use step::ImportStep;
