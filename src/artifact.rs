//! Object URLs for rendered artifacts.
//!
//! The controller cannot hand bytes to the download helper directly; it
//! registers them here and passes the resulting `blob:` URL instead, the
//! same URL the user-facing fallback link points at.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

/// Scheme prefix of every URL minted by [`BlobStore`].
pub const BLOB_URL_PREFIX: &str = "blob:page-csv/";

/// Bytes and MIME type behind an object URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Shared registry of object URLs.
///
/// Clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct BlobStore {
    blobs: Arc<RwLock<HashMap<String, Blob>>>,
}

impl BlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` and return a fresh `blob:` URL for them.
    pub fn create_object_url(&self, bytes: impl Into<Vec<u8>>, mime: &str) -> String {
        let url = format!("{BLOB_URL_PREFIX}{}", Uuid::new_v4());
        let blob = Blob {
            mime: mime.to_string(),
            bytes: bytes.into(),
        };
        // A poisoned lock still holds a consistent map; keep using it.
        let mut blobs = self.blobs.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        blobs.insert(url.clone(), blob);
        url
    }

    /// The blob behind `url`, if it is still registered.
    #[must_use]
    pub fn resolve(&self, url: &str) -> Option<Blob> {
        let blobs = self.blobs.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        blobs.get(url).cloned()
    }

    /// Release `url`; later resolves return `None`.
    pub fn revoke_object_url(&self, url: &str) {
        let mut blobs = self.blobs.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        blobs.remove(url);
    }

    /// Number of live object URLs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.read().unwrap_or_else(std::sync::PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
