//! Request/reply messages exchanged between contexts.
//!
//! Requests are tagged by `action`; replies carry a `success` flag plus
//! either a payload or an error string, matching the extension runtime's
//! JSON shapes:
//!
//! ```text
//! { "action": "scrape" }
//!   -> { "success": true, "data": [...] } | { "success": false, "error": "..." }
//! { "action": "downloadFile", "downloadUrl": "...", "filename": "..." }
//!   -> { "success": true, "downloadId": 7 } | { "success": false, "error": "..." }
//! ```

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// A request addressed to a page agent or the download helper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    /// Ask a page agent for a scrape of its current document.
    Scrape,
    /// Ask the download helper to persist a blob under `filename`.
    #[serde(rename_all = "camelCase")]
    DownloadFile { download_url: String, filename: String },
}

/// Reply to [`Request::Scrape`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Record>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapeReply {
    #[must_use]
    pub fn ok(records: Vec<Record>) -> Self {
        Self {
            success: true,
            data: Some(records),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Records on success, the reported message otherwise.
    ///
    /// # Errors
    ///
    /// Returns the agent's error text, or a generic message when a failed
    /// reply carried none.
    pub fn into_result(self) -> std::result::Result<Vec<Record>, String> {
        if self.success {
            Ok(self.data.unwrap_or_default())
        } else {
            Err(self
                .error
                .unwrap_or_else(|| "Unknown scraping error".to_string()))
        }
    }
}

/// Reply to [`Request::DownloadFile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DownloadReply {
    #[must_use]
    pub fn ok(download_id: u64) -> Self {
        Self {
            success: true,
            download_id: Some(download_id),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            download_id: None,
            error: Some(error.into()),
        }
    }
}
