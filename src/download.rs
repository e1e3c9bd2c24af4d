//! Privileged download helper.
//!
//! Resolves the `blob:` URL of a rendered artifact and persists its bytes
//! into a download directory, answering with a numeric download id. Runs
//! on its own task, reached over JSON messages like the page agent.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::artifact::BlobStore;
use crate::channel::DownloadChannel;
use crate::error::DeliveryError;
use crate::message::{DownloadReply, Request};

/// Characters never allowed in a saved file name.
const FORBIDDEN_FILENAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Download helper state.
#[derive(Debug)]
pub struct DownloadHelper {
    blobs: BlobStore,
    dir: PathBuf,
    next_id: u64,
}

impl DownloadHelper {
    pub fn new(blobs: BlobStore, dir: impl Into<PathBuf>) -> Self {
        Self {
            blobs,
            dir: dir.into(),
            next_id: 1,
        }
    }

    /// Answer a request. `None` means the helper does not listen for it.
    pub async fn handle(&mut self, request: &Request) -> Option<DownloadReply> {
        match request {
            Request::DownloadFile {
                download_url,
                filename,
            } => Some(self.download(download_url, filename).await),
            Request::Scrape => None,
        }
    }

    async fn download(&mut self, download_url: &str, filename: &str) -> DownloadReply {
        let Some(blob) = self.blobs.resolve(download_url) else {
            warn!(%download_url, "download requested for unknown object URL");
            return DownloadReply::failed(format!("Invalid download URL: {download_url}"));
        };

        if let Err(err) = fs::create_dir_all(&self.dir).await {
            warn!(dir = %self.dir.display(), error = %err, "cannot create download directory");
            return DownloadReply::failed(err.to_string());
        }

        let path = match write_unique(&self.dir, &sanitize_filename(filename), &blob.bytes).await {
            Ok(path) => path,
            Err(err) => {
                warn!(dir = %self.dir.display(), error = %err, "download write failed");
                return DownloadReply::failed(err.to_string());
            }
        };

        let id = self.next_id;
        self.next_id += 1;
        info!(id, path = %path.display(), bytes = blob.bytes.len(), mime = %blob.mime, "download complete");
        DownloadReply::ok(id)
    }

    /// Run the helper on its own task.
    #[must_use]
    pub fn spawn(self) -> DownloadHandle {
        let (tx, rx) = mpsc::channel(8);
        tokio::spawn(run_helper(self, rx));
        DownloadHandle { tx }
    }
}

/// Replace characters that cannot appear in a file name.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_control() || FORBIDDEN_FILENAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "download".to_string()
    } else {
        cleaned.to_string()
    }
}

/// `name` for `n == 0`, else `stem (n).ext`.
fn numbered_name(name: &str, n: u32) -> String {
    if n == 0 {
        return name.to_string();
    }
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem} ({n}).{ext}"),
        _ => format!("{name} ({n})"),
    }
}

/// Write `bytes` to the first free `numbered_name` under `dir`.
///
/// Files are opened with `create_new`, so an existing file is never
/// replaced even if another writer claims the name concurrently.
async fn write_unique(dir: &Path, name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    for n in 0.. {
        let path = dir.join(numbered_name(name, n));
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(err) => return Err(err),
        };
        file.write_all(bytes).await?;
        file.flush().await?;
        return Ok(path);
    }
    Err(io::Error::new(io::ErrorKind::AlreadyExists, "no free file name"))
}

type Envelope = (String, oneshot::Sender<String>);

async fn run_helper(mut helper: DownloadHelper, mut rx: mpsc::Receiver<Envelope>) {
    while let Some((request, reply)) = rx.recv().await {
        let request: Request = match serde_json::from_str(&request) {
            Ok(request) => request,
            Err(err) => {
                warn!(error = %err, "dropping malformed request");
                continue;
            }
        };
        let Some(response) = helper.handle(&request).await else {
            debug!(?request, "request not handled by download helper");
            continue;
        };
        match serde_json::to_string(&response) {
            Ok(json) => {
                let _ = reply.send(json);
            }
            Err(err) => warn!(error = %err, "failed to encode download reply"),
        }
    }
    debug!("download helper stopped");
}

/// Handle to a running [`DownloadHelper`].
#[derive(Debug, Clone)]
pub struct DownloadHandle {
    tx: mpsc::Sender<Envelope>,
}

#[async_trait]
impl DownloadChannel for DownloadHandle {
    async fn request_download(
        &self,
        download_url: &str,
        filename: &str,
    ) -> Result<DownloadReply, DeliveryError> {
        let request = serde_json::to_string(&Request::DownloadFile {
            download_url: download_url.to_string(),
            filename: filename.to_string(),
        })?;
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send((request, reply_tx))
            .await
            .map_err(|_| DeliveryError::NoReceiver)?;

        let json = reply_rx.await.map_err(|_| DeliveryError::PortClosed)?;
        Ok(serde_json::from_str(&json)?)
    }
}
