//! Messaging seams between the controller and the other contexts.
//!
//! Each send delivers one request and resolves to exactly one reply or a
//! [`DeliveryError`]. Implementations must not retry on their own; the
//! orchestrator owns timeouts and retries.

use async_trait::async_trait;

use crate::error::DeliveryError;
use crate::message::{DownloadReply, ScrapeReply};

/// Opaque identifier of a page context (a browser tab).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(pub u32);

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tab#{}", self.0)
    }
}

/// Transport to page agents.
#[async_trait]
pub trait PageChannel: Send + Sync {
    /// Ask the agent in `tab` to scrape its document.
    async fn request_scrape(&self, tab: TabId) -> Result<ScrapeReply, DeliveryError>;
}

/// Transport to the privileged download helper.
#[async_trait]
pub trait DownloadChannel: Send + Sync {
    /// Ask the helper to persist the blob behind `download_url`.
    async fn request_download(
        &self,
        download_url: &str,
        filename: &str,
    ) -> Result<DownloadReply, DeliveryError>;
}
