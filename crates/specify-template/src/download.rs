//! Streaming archive transfer
//!
//! The asset is written chunk by chunk into a caller-chosen directory under
//! its own file name. Any failure removes the partial file before the error
//! is returned. The caller owns the finished file and must delete it once
//! extraction is over.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use specify_core::CancelFlag;
use tracing::{debug, info};

use crate::client::TemplateClient;
use crate::error::{truncate, Error, Result};
use crate::releases::ReleaseAsset;

/// Body excerpt length for non-success download responses
const STATUS_BODY_LIMIT: usize = 400;

/// Downloaded archive and its provenance
#[derive(Debug, Clone)]
pub struct TransferResult {
    /// Where the archive was written
    pub local_path: PathBuf,

    /// Asset file name
    pub filename: String,

    /// Bytes written
    pub size_bytes: u64,

    /// Tag of the release the asset belongs to
    pub release_tag: String,

    /// URL the archive was fetched from
    pub source_url: String,
}

impl TemplateClient {
    /// Download an asset into `dest_dir`
    ///
    /// `on_progress` receives `(downloaded, total)` after every chunk; `total`
    /// is `None` when the server sends no usable content length.
    pub async fn download_asset<F>(
        &self,
        asset: &ReleaseAsset,
        release_tag: &str,
        dest_dir: &Path,
        cancel: &CancelFlag,
        mut on_progress: F,
    ) -> Result<TransferResult>
    where
        F: FnMut(u64, Option<u64>),
    {
        let filename = Path::new(&asset.name)
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::transport(format!("Invalid asset name: {}", asset.name)))?
            .to_string();
        let local_path = dest_dir.join(&filename);

        info!("Downloading {} ({} bytes)", filename, asset.size);

        let response = self
            .download_get(&asset.browser_download_url)
            .send()
            .await
            .map_err(|e| Error::transport(format!("Failed to download template: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::transport_with_response(
                format!("Download failed with status {}", status.as_u16()),
                Some(status.as_u16()),
                format!("Body:\n{}", truncate(&body, STATUS_BODY_LIMIT)),
            ));
        }

        let total = response.content_length().filter(|len| *len > 0);
        debug!("Content length: {:?}", total);

        let mut file = File::create(&local_path).map_err(|e| {
            Error::transport(format!("Failed to create {}: {}", local_path.display(), e))
        })?;
        let mut stream = response.bytes_stream();
        let mut downloaded: u64 = 0;

        let streamed: Result<()> = async {
            on_progress(0, total);
            while let Some(chunk) = stream.next().await {
                if cancel.is_cancelled() {
                    return Err(Error::Cancelled);
                }
                let chunk = chunk.map_err(|e| {
                    Error::transport(format!("Failed while reading download stream: {}", e))
                })?;
                file.write_all(&chunk).map_err(|e| write_error(&local_path, e))?;
                downloaded += chunk.len() as u64;
                on_progress(downloaded, total);
            }
            file.flush().map_err(|e| write_error(&local_path, e))?;
            Ok(())
        }
        .await;

        if let Err(e) = streamed {
            drop(file);
            if let Err(rm) = fs::remove_file(&local_path) {
                debug!("Could not remove partial download {}: {}", local_path.display(), rm);
            }
            return Err(e);
        }

        info!("Downloaded {} ({} bytes)", filename, downloaded);

        Ok(TransferResult {
            local_path,
            filename,
            size_bytes: downloaded,
            release_tag: release_tag.to_string(),
            source_url: asset.browser_download_url.clone(),
        })
    }
}

fn write_error(path: &Path, err: std::io::Error) -> Error {
    Error::transport(format!("Failed to write {}: {}", path.display(), err))
}
