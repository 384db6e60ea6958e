//! Import wizard state.

use mpdx_map::missing_required_headers;
use mpdx_model::{ConstantId, CsvImport, FieldId, HeaderTarget, ImportStep};

use crate::error::{ClientError, Result};
use crate::service::ImportService;
use crate::store::ImportStore;

/// One run of the import wizard for an account list.
///
/// Holds the last saved snapshot (`initial`) and the one being edited
/// (`upload`). Both are replaced together after a successful round trip and
/// left alone when one fails.
#[derive(Debug)]
pub struct ImportSession<S> {
    service: ImportService<S>,
    account_list_id: String,
    step: ImportStep,
    initial: Option<CsvImport>,
    upload: Option<CsvImport>,
    finished: bool,
}

impl<S: ImportStore> ImportSession<S> {
    pub fn new(service: ImportService<S>, account_list_id: impl Into<String>) -> Self {
        Self {
            service,
            account_list_id: account_list_id.into(),
            step: ImportStep::Upload,
            initial: None,
            upload: None,
            finished: false,
        }
    }

    pub fn step(&self) -> ImportStep {
        self.step
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn service(&self) -> &ImportService<S> {
        &self.service
    }

    /// Snapshot being edited.
    pub fn current(&self) -> Option<&CsvImport> {
        self.upload.as_ref()
    }

    /// Last snapshot confirmed by the server.
    pub fn initial(&self) -> Option<&CsvImport> {
        self.initial.as_ref()
    }

    /// Upload a file and move on to header mapping.
    pub async fn upload_file(&mut self, file_name: &str, contents: Vec<u8>) -> Result<&CsvImport> {
        if self.step != ImportStep::Upload {
            return Err(ClientError::InvalidState(format!(
                "cannot upload a file during the {} step",
                self.step
            )));
        }
        let import = self
            .service
            .upload(&self.account_list_id, file_name, contents)
            .await?;
        self.step = ImportStep::Headers;
        Ok(self.replace(import))
    }

    /// Continue an import started earlier, at `step`.
    pub async fn resume(&mut self, import_id: &str, step: ImportStep) -> Result<&CsvImport> {
        if step == ImportStep::Upload {
            return Err(ClientError::InvalidState(
                "an uploaded import cannot return to the upload step".to_string(),
            ));
        }
        let import = self
            .service
            .get(&self.account_list_id, import_id, self.initial.as_ref())
            .await?;
        self.step = step;
        self.finished = false;
        Ok(self.replace(import))
    }

    /// Point a raw header at a supported field, or unmap it.
    pub fn set_header(&mut self, header: &str, target: HeaderTarget) -> Result<()> {
        if let Some(field) = target.field() {
            self.service.config().check_supported(field)?;
        }
        self.editing(ImportStep::Headers)?
            .set_header(header, target)?;
        Ok(())
    }

    /// Map one raw value of `field` to a constant.
    pub fn set_value(&mut self, field: &FieldId, raw_value: &str, constant: ConstantId) -> Result<()> {
        self.editing(ImportStep::Values)?
            .set_value(field, raw_value, constant)?;
        Ok(())
    }

    /// Save the current step and advance.
    ///
    /// Returns the new step, or `None` once the preview has been confirmed
    /// and the import handed over to the server.
    pub async fn advance(&mut self) -> Result<Option<ImportStep>> {
        if self.finished {
            return Err(ClientError::InvalidState(
                "the import is already finished".to_string(),
            ));
        }
        let upload = self.upload.as_ref();
        match self.step {
            ImportStep::Upload => {
                return Err(ClientError::InvalidState(
                    "upload a file before continuing".to_string(),
                ));
            }
            ImportStep::Headers => {
                if let Some(upload) = upload {
                    let missing =
                        missing_required_headers(&upload.header_mapping, self.service.config());
                    if !missing.is_empty() {
                        return Err(ClientError::MissingRequiredHeaders(missing));
                    }
                }
            }
            ImportStep::Values | ImportStep::Preview => {}
        }

        let saved = if self.step == ImportStep::Preview {
            let initial = self
                .initial
                .as_ref()
                .ok_or(ClientError::IncompleteData { missing: "initial" })?;
            let upload = upload.ok_or(ClientError::IncompleteData { missing: "upload" })?;
            self.service
                .complete(&self.account_list_id, initial, upload)
                .await?
        } else {
            self.service
                .save(&self.account_list_id, self.initial.as_ref(), upload)
                .await?
        };

        let next = self.step.next(&saved);
        tracing::debug!(from = %self.step, to = ?next, "import step saved");
        match next {
            Some(step) => self.step = step,
            None => self.finished = true,
        }
        self.replace(saved);
        Ok(next)
    }

    fn editing(&mut self, step: ImportStep) -> Result<&mut CsvImport> {
        if self.finished || self.step != step {
            return Err(ClientError::InvalidState(format!(
                "cannot edit {} during the {} step",
                step.label().to_lowercase(),
                self.step
            )));
        }
        self.upload.as_mut().ok_or(ClientError::IncompleteData { missing: "upload" })
    }

    fn replace(&mut self, import: CsvImport) -> &CsvImport {
        self.initial = Some(import.clone());
        self.upload.insert(import)
    }
}
