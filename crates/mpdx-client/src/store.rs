//! Persistence seam for CSV imports.

use std::future::Future;

use mpdx_model::CsvImport;

use crate::error::Result;
use crate::types::ImportResource;

/// Remote storage of CSV imports.
///
/// Implemented over HTTP by [`HttpImportStore`](crate::HttpImportStore);
/// tests substitute an in-memory store.
pub trait ImportStore {
    /// Upload a file and return the parsed import.
    fn upload(
        &self,
        account_list_id: &str,
        file_name: &str,
        contents: Vec<u8>,
    ) -> impl Future<Output = Result<ImportResource>> + Send;

    /// Fetch the canonical state of an import.
    fn fetch(
        &self,
        account_list_id: &str,
        import_id: &str,
    ) -> impl Future<Output = Result<ImportResource>> + Send;

    /// Persist `upload` over `initial` and return the canonical result.
    ///
    /// `upload` is already prepared: unmapped headers stripped and its
    /// constants mappings rebuilt from the value view.
    fn update(
        &self,
        account_list_id: &str,
        initial: &CsvImport,
        upload: &CsvImport,
    ) -> impl Future<Output = Result<ImportResource>> + Send;
}
