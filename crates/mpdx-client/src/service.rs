//! Save and load orchestration around the mapping transforms.

use mpdx_map::{
    FileContext, coerce_boolean_fields, strip_unmapped, value_mappings_to_constants_mappings,
};
use mpdx_model::{CsvImport, ImportConfig};

use crate::convert::import_from_resource;
use crate::error::{ClientError, Result};
use crate::store::ImportStore;

/// Loads, saves and uploads imports through an [`ImportStore`].
///
/// Snapshots passed in are borrowed and never modified. Every successful
/// call returns the new canonical snapshot; on failure the caller simply
/// keeps what it had.
#[derive(Debug, Clone)]
pub struct ImportService<S> {
    store: S,
    config: ImportConfig,
}

impl<S: ImportStore> ImportService<S> {
    pub fn new(store: S, config: ImportConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// The snapshot that `save` sends: unmapped headers removed, boolean
    /// constants coerced, and constants mappings rebuilt from the value view.
    pub fn prepare_upload(&self, upload: &CsvImport) -> CsvImport {
        let mut prepared = upload.clone();
        prepared.header_mapping = strip_unmapped(&upload.header_mapping);
        prepared.value_mappings = coerce_boolean_fields(&upload.value_mappings, &self.config);
        prepared.constants_mappings = value_mappings_to_constants_mappings(
            &prepared.value_mappings,
            Some(FileContext::of(&prepared)),
            &self.config,
        );
        prepared
    }

    /// Persist the edited snapshot and return the server's canonical one.
    pub async fn save(
        &self,
        account_list_id: &str,
        initial: Option<&CsvImport>,
        upload: Option<&CsvImport>,
    ) -> Result<CsvImport> {
        let initial = initial.ok_or(ClientError::IncompleteData { missing: "initial" })?;
        let upload = upload.ok_or(ClientError::IncompleteData { missing: "upload" })?;

        let prepared = self.prepare_upload(upload);
        tracing::info!(
            import_id = %prepared.id,
            headers = prepared.header_mapping.len(),
            constant_fields = prepared.constants_mappings.len(),
            "saving csv import"
        );

        match self.store.update(account_list_id, initial, &prepared).await {
            Ok(resource) => Ok(import_from_resource(resource, &self.config)),
            Err(err) => {
                tracing::error!(import_id = %prepared.id, error = %err, "failed to save csv import");
                Err(err)
            }
        }
    }

    /// Load an import, reusing `initial` when it already is that import.
    pub async fn get(
        &self,
        account_list_id: &str,
        csv_file_id: &str,
        initial: Option<&CsvImport>,
    ) -> Result<CsvImport> {
        if let Some(cached) = initial.filter(|import| import.id == csv_file_id) {
            tracing::debug!(import_id = csv_file_id, "csv import already loaded");
            return Ok(cached.clone());
        }

        tracing::info!(import_id = csv_file_id, "loading csv import");
        match self.store.fetch(account_list_id, csv_file_id).await {
            Ok(resource) => Ok(import_from_resource(resource, &self.config)),
            Err(err) => {
                tracing::error!(import_id = csv_file_id, error = %err, "failed to load csv import");
                Err(err)
            }
        }
    }

    /// Upload a new file and return its first snapshot.
    pub async fn upload(
        &self,
        account_list_id: &str,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<CsvImport> {
        tracing::info!(file_name, bytes = contents.len(), "uploading csv import");
        match self.store.upload(account_list_id, file_name, contents).await {
            Ok(resource) => Ok(import_from_resource(resource, &self.config)),
            Err(err) => {
                tracing::error!(file_name, error = %err, "failed to upload csv import");
                Err(err)
            }
        }
    }

    /// Leave preview: the server starts importing contacts.
    pub async fn complete(
        &self,
        account_list_id: &str,
        initial: &CsvImport,
        upload: &CsvImport,
    ) -> Result<CsvImport> {
        let mut finished = upload.clone();
        finished.in_preview = false;
        self.save(account_list_id, Some(initial), Some(&finished)).await
    }
}
