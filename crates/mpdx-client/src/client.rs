//! HTTP implementation of [`ImportStore`].

use mpdx_model::CsvImport;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::multipart::{Form, Part};

use crate::config::ApiSettings;
use crate::convert::{changed_attributes, wire_attributes};
use crate::error::{ClientError, Result};
use crate::store::ImportStore;
use crate::types::{IMPORT_TYPE, ImportDocument, ImportResource, UpdateDocument};

/// JSON:API media type.
const JSON_API: &str = "application/vnd.api+json";

const USER_AGENT_VALUE: &str = concat!("mpdx-import/", env!("CARGO_PKG_VERSION"));

/// Import store backed by the MPDX REST API.
#[derive(Debug, Clone)]
pub struct HttpImportStore {
    client: reqwest::Client,
    settings: ApiSettings,
}

impl HttpImportStore {
    pub fn new(settings: ApiSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_API));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        if let Some(token) = &settings.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ClientError::Config(format!("invalid API token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout())
            .build()
            .map_err(|e| ClientError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<ImportResource> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let document: ImportDocument = response.json().await?;
        Ok(document.data)
    }
}

impl ImportStore for HttpImportStore {
    async fn upload(
        &self,
        account_list_id: &str,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<ImportResource> {
        let url = self.settings.imports_url(account_list_id);
        tracing::debug!(%url, file_name, bytes = contents.len(), "uploading csv file");

        let part = Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str("text/csv")?;
        let form = Form::new()
            .text("data[type]", IMPORT_TYPE)
            .part("data[attributes][file]", part);

        let response = self.client.post(&url).multipart(form).send().await?;
        self.handle_response(response).await
    }

    async fn fetch(&self, account_list_id: &str, import_id: &str) -> Result<ImportResource> {
        let url = self.settings.import_url(account_list_id, import_id);
        tracing::debug!(%url, "fetching csv import");

        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    async fn update(
        &self,
        account_list_id: &str,
        initial: &CsvImport,
        upload: &CsvImport,
    ) -> Result<ImportResource> {
        let url = self.settings.import_url(account_list_id, &upload.id);
        let changed = changed_attributes(initial, upload)?;
        tracing::debug!(%url, ?changed, "updating csv import");

        let body = serde_json::to_vec(&UpdateDocument::new(
            upload.id.clone(),
            wire_attributes(upload)?,
        ))?;
        let response = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, JSON_API)
            .body(body)
            .send()
            .await?;
        self.handle_response(response).await
    }
}
