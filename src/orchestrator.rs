//! Scrape orchestration from the controller context.
//!
//! One [`Orchestrator::run_scrape`] call per user action: refuse restricted
//! addresses, ask the page agent for records with bounded retry, render the
//! CSV document, and hand it to the download helper, falling back to a
//! clickable object URL when the helper cannot persist it.

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::artifact::BlobStore;
use crate::channel::{DownloadChannel, PageChannel, TabId};
use crate::error::{Error, Result};
use crate::export::{self, CSV_MIME};
use crate::extractor::iso_timestamp;
use crate::options::ScrapeConfig;
use crate::record::Record;
use crate::url_utils;

/// Host component used when the page address has none.
const UNKNOWN_HOST: &str = "unknown-host";

/// The page a scrape is aimed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeTarget {
    pub tab: TabId,
    /// Address currently shown in the tab.
    pub url: String,
}

impl ScrapeTarget {
    pub fn new(tab: TabId, url: impl Into<String>) -> Self {
        Self {
            tab,
            url: url.into(),
        }
    }
}

/// How the rendered document reached the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Saved by the download helper.
    Downloaded { download_id: u64 },
    /// The helper failed; the document is exposed as a link to click.
    LinkExposed { download_url: String },
}

/// Result of one successful scrape invocation.
///
/// This is the whole view state of an invocation: nothing about it lives
/// in the orchestrator after `run_scrape` returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeOutcome {
    /// Records received from the page, page info included.
    pub item_count: usize,
    pub filename: String,
    /// Rendered CSV document.
    pub document: String,
    pub delivery: Delivery,
}

impl ScrapeOutcome {
    /// Status line for the user surface.
    #[must_use]
    pub fn status_message(&self) -> String {
        match self.delivery {
            Delivery::Downloaded { .. } => format!(
                "Successfully scraped {} items! Check your downloads.",
                self.item_count
            ),
            Delivery::LinkExposed { .. } => format!(
                "Successfully scraped {} items! Click the download button below.",
                self.item_count
            ),
        }
    }
}

/// Reject addresses whose scheme cannot host a page agent.
///
/// # Errors
///
/// [`Error::UnscrapablePage`] for restricted schemes.
pub fn check_scrapable(config: &ScrapeConfig, url: &str) -> Result<()> {
    match url_utils::scheme(url) {
        Some(scheme) if config.is_restricted(&scheme) => Err(Error::UnscrapablePage(url.to_string())),
        _ => Ok(()),
    }
}

/// `<prefix>-<host>-<timestamp>.csv` with `:` and `.` in the timestamp
/// replaced by `-`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use page_csv::orchestrator::output_filename;
///
/// let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
/// assert_eq!(
///     output_filename("scraped", "https://example.com/a", at),
///     "scraped-example.com-2024-05-01T12-30-00-000Z.csv"
/// );
/// ```
#[must_use]
pub fn output_filename(prefix: &str, page_url: &str, at: DateTime<Utc>) -> String {
    let host = url_utils::hostname(page_url).unwrap_or_else(|| UNKNOWN_HOST.to_string());
    let stamp = iso_timestamp(at).replace([':', '.'], "-");
    format!("{prefix}-{host}-{stamp}.csv")
}

/// Controller-side driver of a scrape.
#[derive(Debug)]
pub struct Orchestrator<P, D> {
    pages: P,
    downloads: D,
    blobs: BlobStore,
    config: ScrapeConfig,
}

impl<P, D> Orchestrator<P, D>
where
    P: PageChannel,
    D: DownloadChannel,
{
    pub fn new(pages: P, downloads: D, blobs: BlobStore, config: ScrapeConfig) -> Self {
        Self {
            pages,
            downloads,
            blobs,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Scrape `target` and deliver the rendered CSV.
    ///
    /// Callers serialize invocations; each call is independent.
    ///
    /// # Errors
    ///
    /// - [`Error::UnscrapablePage`] for restricted addresses, before any
    ///   delivery attempt.
    /// - [`Error::UnresponsiveTarget`] once every attempt failed to deliver
    ///   or timed out.
    /// - [`Error::ScrapeFailed`] when the page answered with a failure.
    pub async fn run_scrape(&self, target: &ScrapeTarget) -> Result<ScrapeOutcome> {
        let result = self.scrape_and_deliver(target).await;
        if let Err(err) = &result {
            error!(tab = %target.tab, url = %target.url, error = %err, "scrape failed");
        }
        result
    }

    async fn scrape_and_deliver(&self, target: &ScrapeTarget) -> Result<ScrapeOutcome> {
        check_scrapable(&self.config, &target.url)?;
        info!(tab = %target.tab, url = %target.url, "scrape started");

        let records = self.request_records(target.tab).await?;
        info!(tab = %target.tab, records = records.len(), "scrape received");

        let document = export::render(&records);
        let filename = output_filename(&self.config.filename_prefix, &target.url, Utc::now());
        let delivery = self.deliver(&document, &filename).await;

        Ok(ScrapeOutcome {
            item_count: records.len(),
            filename,
            document,
            delivery,
        })
    }

    /// Sequential attempts, each bounded by the attempt timeout, with the
    /// backoff between failures.
    async fn request_records(&self, tab: TabId) -> Result<Vec<Record>> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let reply = tokio::time::timeout(
                self.config.attempt_timeout,
                self.pages.request_scrape(tab),
            )
            .await;

            let failure = match reply {
                Ok(Ok(reply)) => return reply.into_result().map_err(Error::ScrapeFailed),
                Ok(Err(err)) => err.to_string(),
                Err(_) => "Message timeout".to_string(),
            };
            warn!(%tab, attempt, max_attempts, reason = %failure, "scrape attempt failed");

            if attempt >= max_attempts {
                return Err(Error::UnresponsiveTarget { attempts: attempt });
            }
            tokio::time::sleep(self.config.retry_backoff).await;
        }
    }

    /// Hand the document to the download helper, bounded by the attempt
    /// timeout. Any failure leaves the object URL registered and exposed.
    async fn deliver(&self, document: &str, filename: &str) -> Delivery {
        let download_url = self.blobs.create_object_url(document, CSV_MIME);

        let reply = tokio::time::timeout(
            self.config.attempt_timeout,
            self.downloads.request_download(&download_url, filename),
        )
        .await;

        let failure = match reply {
            Ok(Ok(reply)) if reply.success => match reply.download_id {
                Some(download_id) => {
                    info!(download_id, %filename, "download requested");
                    self.blobs.revoke_object_url(&download_url);
                    return Delivery::Downloaded { download_id };
                }
                None => Error::PersistenceFailed("reply carried no download id".to_string()),
            },
            Ok(Ok(reply)) => Error::PersistenceFailed(
                reply
                    .error
                    .unwrap_or_else(|| "download was rejected".to_string()),
            ),
            Ok(Err(err)) => Error::PersistenceFailed(err.to_string()),
            Err(_) => Error::PersistenceFailed("download timed out".to_string()),
        };

        warn!(error = %failure, %filename, "falling back to download link");
        Delivery::LinkExposed { download_url }
    }
}
