//! Page-context agent.
//!
//! The agent lives next to the page document and answers scrape requests
//! by running the extractor over its current snapshot. It runs as its own
//! task and is reached only through JSON messages, so the controller never
//! touches the document directly.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tokio::task;
use tracing::{debug, info, warn};

use crate::channel::{PageChannel, TabId};
use crate::error::{DeliveryError, Error};
use crate::extractor;
use crate::message::{Request, ScrapeReply};
use crate::options::ExtractOptions;
use crate::snapshot::PageSnapshot;

/// Page-side request handler.
#[derive(Debug, Clone)]
pub struct PageAgent {
    snapshot: Option<PageSnapshot>,
    options: ExtractOptions,
}

impl PageAgent {
    #[must_use]
    pub fn new(snapshot: PageSnapshot, options: ExtractOptions) -> Self {
        Self {
            snapshot: Some(snapshot),
            options,
        }
    }

    /// Answer a request. `None` means the agent does not listen for it.
    #[must_use]
    pub fn handle(&self, request: &Request) -> Option<ScrapeReply> {
        match request {
            Request::Scrape => Some(self.scrape()),
            Request::DownloadFile { .. } => None,
        }
    }

    fn scrape(&self) -> ScrapeReply {
        let Some(snapshot) = &self.snapshot else {
            warn!("scrape requested after the page was torn down");
            return ScrapeReply::failed(
                Error::ExtractionFailed("page document is no longer available".to_string())
                    .to_string(),
            );
        };

        match extractor::extract_records(snapshot, &self.options) {
            Ok(records) => {
                info!(url = %snapshot.url(), records = records.len(), "page scraped");
                ScrapeReply::ok(records)
            }
            Err(err) => {
                warn!(url = %snapshot.url(), error = %err, "page scrape failed");
                ScrapeReply::failed(err.to_string())
            }
        }
    }

    /// Replace the document, as after a navigation.
    pub fn navigate(&mut self, snapshot: PageSnapshot) {
        self.snapshot = Some(snapshot);
    }

    /// Drop the document, as when the page is unloading.
    pub fn tear_down(&mut self) {
        self.snapshot = None;
    }

    /// Run the agent on its own task.
    #[must_use]
    pub fn spawn(self) -> AgentHandle {
        let (tx, rx) = mpsc::channel(8);
        tokio::spawn(run_agent(self, rx));
        AgentHandle { tx }
    }
}

enum Command {
    Message {
        request: String,
        reply: oneshot::Sender<String>,
    },
    Navigate(PageSnapshot),
    TearDown,
}

async fn run_agent(mut agent: PageAgent, mut rx: mpsc::Receiver<Command>) {
    while let Some(command) = rx.recv().await {
        match command {
            Command::Message { request, reply } => {
                let request: Request = match serde_json::from_str(&request) {
                    Ok(request) => request,
                    Err(err) => {
                        warn!(error = %err, "dropping malformed request");
                        continue;
                    }
                };
                // Extraction is CPU-bound; run it off the async threads.
                let worker = agent.clone();
                let response = match task::spawn_blocking(move || worker.handle(&request)).await {
                    Ok(Some(response)) => response,
                    Ok(None) => {
                        debug!("request not handled by page agent");
                        continue;
                    }
                    Err(err) => {
                        warn!(error = %err, "scrape task failed");
                        ScrapeReply::failed(Error::ExtractionFailed(err.to_string()).to_string())
                    }
                };
                match serde_json::to_string(&response) {
                    Ok(json) => {
                        // The sender may have timed out and gone away.
                        let _ = reply.send(json);
                    }
                    Err(err) => warn!(error = %err, "failed to encode scrape reply"),
                }
            }
            Command::Navigate(snapshot) => agent.navigate(snapshot),
            Command::TearDown => agent.tear_down(),
        }
    }
    debug!("page agent stopped");
}

/// Handle to a running [`PageAgent`].
#[derive(Debug, Clone)]
pub struct AgentHandle {
    tx: mpsc::Sender<Command>,
}

impl AgentHandle {
    /// Deliver one request and wait for its reply.
    ///
    /// # Errors
    ///
    /// [`DeliveryError::NoReceiver`] if the agent has stopped,
    /// [`DeliveryError::PortClosed`] if it dropped the request unanswered.
    pub async fn send(&self, request: &Request) -> Result<ScrapeReply, DeliveryError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let request = serde_json::to_string(request)?;
        self.tx
            .send(Command::Message {
                request,
                reply: reply_tx,
            })
            .await
            .map_err(|_| DeliveryError::NoReceiver)?;

        let json = reply_rx.await.map_err(|_| DeliveryError::PortClosed)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load a new document into the page.
    pub async fn navigate(&self, snapshot: PageSnapshot) {
        let _ = self.tx.send(Command::Navigate(snapshot)).await;
    }

    /// Unload the page document; later scrapes report an extraction failure.
    pub async fn tear_down(&self) {
        let _ = self.tx.send(Command::TearDown).await;
    }
}

/// Page channel over a fixed set of tabs.
#[derive(Debug, Clone, Default)]
pub struct TabRouter {
    tabs: HashMap<TabId, AgentHandle>,
}

impl TabRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the agent injected into `tab`.
    pub fn insert(&mut self, tab: TabId, agent: AgentHandle) {
        self.tabs.insert(tab, agent);
    }

    #[must_use]
    pub fn with_tab(mut self, tab: TabId, agent: AgentHandle) -> Self {
        self.insert(tab, agent);
        self
    }
}

#[async_trait]
impl PageChannel for TabRouter {
    async fn request_scrape(&self, tab: TabId) -> Result<ScrapeReply, DeliveryError> {
        let agent = self.tabs.get(&tab).ok_or(DeliveryError::NoReceiver)?;
        agent.send(&Request::Scrape).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Record, RecordKind};

    fn agent(html: &str) -> PageAgent {
        PageAgent::new(
            PageSnapshot::new(html, "https://example.com/"),
            ExtractOptions::default(),
        )
    }

    #[test]
    fn handle_scrape_returns_records() {
        let reply = agent("<p>Some paragraph text here</p>").handle(&Request::Scrape);

        let records = reply.unwrap().into_result().unwrap();
        assert_eq!(records[0].kind(), RecordKind::PageInfo);
        assert!(records.iter().any(|r| matches!(r, Record::Text(_))));
    }

    #[test]
    fn handle_ignores_download_requests() {
        let request = Request::DownloadFile {
            download_url: "blob:x".to_string(),
            filename: "f.csv".to_string(),
        };

        assert!(agent("").handle(&request).is_none());
    }

    #[test]
    fn torn_down_page_reports_extraction_failure() {
        let mut agent = agent("<p>x</p>");
        agent.tear_down();

        let error = agent.handle(&Request::Scrape).unwrap().into_result().unwrap_err();
        assert!(error.starts_with("Extraction failed"));
    }

    #[tokio::test]
    async fn spawned_agent_answers_over_json() {
        let handle = agent("<a href='/x'>x</a>").spawn();

        let reply = handle.send(&Request::Scrape).await.unwrap();
        let records = reply.into_result().unwrap();

        assert!(records.iter().any(|r| r.kind() == RecordKind::Link));
    }

    #[tokio::test]
    async fn unhandled_request_closes_port() {
        let handle = agent("").spawn();
        let request = Request::DownloadFile {
            download_url: "blob:x".to_string(),
            filename: "f.csv".to_string(),
        };

        assert_eq!(handle.send(&request).await, Err(DeliveryError::PortClosed));
    }

    #[tokio::test]
    async fn router_without_tab_reports_no_receiver() {
        let router = TabRouter::new();

        assert_eq!(router.request_scrape(TabId(9)).await, Err(DeliveryError::NoReceiver));
    }

    #[tokio::test]
    async fn navigate_replaces_document() {
        let handle = agent("<p>first page paragraph</p>").spawn();
        handle
            .navigate(PageSnapshot::new("<p>second page paragraph</p>", "https://example.org/"))
            .await;

        let records = handle.send(&Request::Scrape).await.unwrap().into_result().unwrap();

        match &records[0] {
            Record::PageInfo(info) => assert_eq!(info.domain, "example.org"),
            other => panic!("unexpected record {other:?}"),
        }
    }
}
