//! MPDX CSV import API client.
//!
//! [`ImportService`] wraps the mapping transforms with upload, fetch and
//! update calls on an [`ImportStore`]. [`ImportSession`] drives the wizard
//! steps on top of it. [`HttpImportStore`] talks to the REST API.

pub mod client;
pub mod config;
pub mod convert;
pub mod error;
pub mod service;
pub mod session;
pub mod store;
pub mod types;

pub use client::HttpImportStore;
pub use config::{ApiSettings, DEFAULT_BASE_URL};
pub use convert::{changed_attributes, import_from_resource, wire_attributes};
pub use error::{ClientError, Result};
pub use service::ImportService;
pub use session::ImportSession;
pub use store::ImportStore;
pub use types::{ImportAttributes, ImportDocument, ImportResource};
