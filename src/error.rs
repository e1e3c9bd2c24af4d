//! Error types for page-csv.
//!
//! Every failure is terminal for the scrape invocation that produced it.
//! The `Display` text of each variant is what the user sees.

/// Error type for scrape, export and persistence operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The target address uses a browser-internal or extension scheme.
    #[error("Cannot scrape browser internal pages ({0})")]
    UnscrapablePage(String),

    /// The page context never answered within the retry budget.
    #[error("Content script not responding after {attempts} attempts. Please refresh the page and try again.")]
    UnresponsiveTarget {
        /// Number of delivery attempts made before giving up.
        attempts: u32,
    },

    /// The page context answered but reported its own failure.
    #[error("{0}")]
    ScrapeFailed(String),

    /// The document snapshot could not be walked.
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    /// The download collaborator was unavailable or rejected the file.
    #[error("Download failed: {0}")]
    PersistenceFailed(String),
}

/// Failure to deliver a message to another context.
///
/// Mirrors the runtime's "receiving end does not exist" family of errors:
/// the request never produced a reply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// No listener is registered for the addressed target.
    #[error("Could not establish connection. Receiving end does not exist.")]
    NoReceiver,

    /// The listener went away before replying.
    #[error("The message port closed before a response was received.")]
    PortClosed,

    /// The request or the reply could not be encoded on the wire.
    #[error("Malformed message: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for DeliveryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Result type alias for page-csv operations.
pub type Result<T> = std::result::Result<T, Error>;
