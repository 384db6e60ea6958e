use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CsvImport;

/// Steps of the import wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStep {
    #[default]
    Upload,
    Headers,
    Values,
    Preview,
}

impl ImportStep {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Upload => "Upload",
            Self::Headers => "Headers",
            Self::Values => "Values",
            Self::Preview => "Preview",
        }
    }

    /// Step that follows a successful save, `None` once the preview is done.
    ///
    /// `Values` is skipped when the saved import has nothing to map.
    pub fn next(self, import: &CsvImport) -> Option<Self> {
        match self {
            Self::Upload => Some(Self::Headers),
            Self::Headers if import.has_value_mappings() => Some(Self::Values),
            Self::Headers | Self::Values => Some(Self::Preview),
            Self::Preview => None,
        }
    }
}

impl fmt::Display for ImportStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
