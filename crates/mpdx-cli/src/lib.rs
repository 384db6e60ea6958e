//! CLI library components for the MPDX import wizard.

pub mod logging;
pub mod settings;
