//! API connection settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default MPDX API root.
pub const DEFAULT_BASE_URL: &str = "https://api.mpdx.org/api/v2";

/// Connection settings for the import API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// API root, without a trailing slash.
    pub base_url: String,

    /// Bearer token. Usually supplied through the environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

impl ApiSettings {
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `{base}/account_lists/{id}/imports/csv`
    #[must_use]
    pub fn imports_url(&self, account_list_id: &str) -> String {
        format!(
            "{}/account_lists/{}/imports/csv",
            self.base_url.trim_end_matches('/'),
            account_list_id
        )
    }

    /// `{base}/account_lists/{id}/imports/csv/{import_id}`
    #[must_use]
    pub fn import_url(&self, account_list_id: &str, import_id: &str) -> String {
        format!("{}/{}", self.imports_url(account_list_id), import_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_import_urls() {
        let settings = ApiSettings {
            base_url: "https://api.example.org/v2/".to_string(),
            ..ApiSettings::default()
        };
        assert_eq!(
            settings.imports_url("acc-1"),
            "https://api.example.org/v2/account_lists/acc-1/imports/csv"
        );
        assert_eq!(
            settings.import_url("acc-1", "file-1"),
            "https://api.example.org/v2/account_lists/acc-1/imports/csv/file-1"
        );
    }

    #[test]
    fn token_is_not_written_when_absent() {
        let json = serde_json::to_string(&ApiSettings::default()).unwrap();
        assert!(!json.contains("token"));
    }
}
