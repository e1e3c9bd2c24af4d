//! # page-csv
//!
//! Scrape the structured content of a web page and export it as a
//! sectioned CSV document.
//!
//! The crate models the three contexts of a page-scraping browser
//! extension as independent components that only exchange JSON messages:
//!
//! - a **page agent** ([`agent`]) that owns the page document and runs the
//!   record [`extractor`] on request,
//! - a **controller** ([`orchestrator`]) that asks for a scrape with bounded
//!   retry, renders the result with [`export`], and hands it on,
//! - a **download helper** ([`download`]) that persists the rendered bytes.
//!
//! ## Quick Start
//!
//! ```rust
//! use page_csv::{extract_records, render, ExtractOptions, PageSnapshot};
//!
//! let snapshot = PageSnapshot::new(
//!     "<html><head><title>Shop</title></head>\
//!      <body><p>Welcome to our little shop.</p><a href='/cart'>Cart</a></body></html>",
//!     "https://shop.example.com/",
//! );
//!
//! let records = extract_records(&snapshot, &ExtractOptions::default())?;
//! let csv = render(&records);
//! assert!(csv.contains("=== LINKS ==="));
//! assert!(csv.contains("\"https://shop.example.com/cart\""));
//! # Ok::<(), page_csv::Error>(())
//! ```
//!
//! ## Full scrape
//!
//! ```rust
//! use page_csv::{
//!     BlobStore, DownloadHelper, ExtractOptions, Orchestrator, PageAgent, PageSnapshot,
//!     ScrapeConfig, ScrapeTarget, TabId, TabRouter,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> page_csv::Result<()> {
//! let page = PageAgent::new(
//!     PageSnapshot::new("<p>Hello from the page body.</p>", "https://example.com/"),
//!     ExtractOptions::default(),
//! );
//! let tabs = TabRouter::new().with_tab(TabId(1), page.spawn());
//!
//! let blobs = BlobStore::new();
//! let downloads_dir = std::env::temp_dir().join("page-csv-doc");
//! let helper = DownloadHelper::new(blobs.clone(), downloads_dir).spawn();
//!
//! let controller = Orchestrator::new(tabs, helper, blobs, ScrapeConfig::default());
//! let outcome = controller
//!     .run_scrape(&ScrapeTarget::new(TabId(1), "https://example.com/"))
//!     .await?;
//! println!("{}", outcome.status_message());
//! # Ok(())
//! # }
//! ```

mod error;
mod options;
mod patterns;
mod record;
mod snapshot;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Charset sniffing and decoding of raw page bytes.
pub mod encoding;

/// URL resolution and scheme/host helpers.
pub mod url_utils;

/// Structural locators for DOM nodes.
pub mod locator;

/// Record extraction from page snapshots.
pub mod extractor;

/// Sectioned CSV rendering.
pub mod export;

/// Wire messages between contexts.
pub mod message;

/// Transport traits between contexts.
pub mod channel;

/// Page-context agent.
pub mod agent;

/// Object URL registry for rendered artifacts.
pub mod artifact;

/// Privileged download helper.
pub mod download;

/// Controller-side scrape orchestration.
pub mod orchestrator;

// Public API - re-exports
pub use agent::{AgentHandle, PageAgent, TabRouter};
pub use artifact::BlobStore;
pub use channel::{DownloadChannel, PageChannel, TabId};
pub use download::{DownloadHandle, DownloadHelper};
pub use error::{DeliveryError, Error, Result};
pub use export::{render, RecordCounts};
pub use extractor::{extract_records, extract_records_at};
pub use message::{DownloadReply, Request, ScrapeReply};
pub use options::{ExtractOptions, ScrapeConfig, RESTRICTED_SCHEMES};
pub use orchestrator::{Delivery, Orchestrator, ScrapeOutcome, ScrapeTarget};
pub use record::{
    FormElement, Image, Link, MetaTag, PageInfo, Record, RecordKind, TableCell, TextBlock,
};
pub use snapshot::PageSnapshot;
