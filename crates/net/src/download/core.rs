//! Verified downloader orchestration

use super::config::{DownloadOptions, DownloadRequest, DownloadResult};
use super::session::{DownloadSession, DownloadStatus};
use super::stream::stream_to_part;
use super::validation::{expected_checksum, part_path, validate_response, validate_url};
use crate::client::NetClient;
use spout_errors::{Error, NetworkError};
use spout_events::{AppEvent, DownloadEvent, EventEmitter, EventSender};
use std::path::Path;
use tokio::fs as tokio_fs;

/// Streams an artifact to disk and commits it only when its MD5 matches
pub struct Downloader {
    client: NetClient,
    options: DownloadOptions,
}

impl Downloader {
    #[must_use]
    pub fn new(client: NetClient, options: DownloadOptions) -> Self {
        Self { client, options }
    }

    /// Download `request.url` to `request.destination`
    ///
    /// The body is written to `<destination>.part`; the final path only
    /// appears after the digest matched. `session` reaches exactly one
    /// terminal status before this returns, whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::ChecksumMismatch` when the hashes differ, and a
    /// transport, HTTP or I/O error for any other failure.
    pub async fn download(
        &self,
        request: &DownloadRequest,
        session: &DownloadSession,
        tx: &EventSender,
    ) -> Result<DownloadResult, Error> {
        let result = self.download_inner(request, session, tx).await;

        let status = match &result {
            Ok(_) => DownloadStatus::Success,
            Err(Error::Network(NetworkError::ChecksumMismatch { .. })) => {
                DownloadStatus::ChecksumMismatch
            }
            Err(_) => DownloadStatus::TransportError,
        };
        session.finish(status);

        match &result {
            Ok(done) => tx.emit_download_completed(
                &request.url,
                done.path.clone(),
                done.size,
                done.md5.to_hex(),
            ),
            Err(Error::Network(NetworkError::ChecksumMismatch { .. })) => {}
            Err(e) => tx.emit(AppEvent::Download(DownloadEvent::Failed {
                url: request.url.clone(),
                error: e.to_string(),
            })),
        }

        result
    }

    async fn download_inner(
        &self,
        request: &DownloadRequest,
        session: &DownloadSession,
        tx: &EventSender,
    ) -> Result<DownloadResult, Error> {
        let url = validate_url(&request.url)?;
        let destination = request.destination.as_path();
        let part = part_path(destination);

        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio_fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::io_with_path(&e, parent))?;
        }

        let response = self.client.get(url.as_str(), tx).await?;
        validate_response(&response)?;

        let (expected, source) =
            expected_checksum(&response, request.fallback_md5.as_deref(), url.as_str())?;
        if let Some(length) = response.content_length().filter(|n| *n > 0) {
            session.set_total(length);
        }

        tx.emit(AppEvent::Download(DownloadEvent::HashVerificationStarted {
            url: request.url.clone(),
            expected: expected.to_hex(),
        }));

        let streamed = stream_to_part(response, &part, session, &self.options, url.as_str()).await;
        let (size, actual) = match streamed {
            Ok(done) => done,
            Err(e) => {
                remove_quietly(&part).await;
                return Err(e);
            }
        };

        if actual != expected {
            let keep = self.options.keep_partial_on_mismatch;
            if !keep {
                remove_quietly(&part).await;
            }
            tx.emit(AppEvent::Download(DownloadEvent::HashMismatch {
                url: request.url.clone(),
                expected: expected.to_hex(),
                actual: actual.to_hex(),
                partial_kept: keep,
            }));
            return Err(NetworkError::ChecksumMismatch {
                expected: expected.to_hex(),
                actual: actual.to_hex(),
            }
            .into());
        }

        if let Err(e) = tokio_fs::rename(&part, destination).await {
            remove_quietly(&part).await;
            return Err(Error::io_with_path(&e, destination));
        }

        Ok(DownloadResult {
            path: destination.to_path_buf(),
            size,
            md5: actual,
            checksum_source: source,
        })
    }
}

async fn remove_quietly(path: &Path) {
    // Best-effort cleanup - the .part file is discardable
    let _ = tokio_fs::remove_file(path).await;
}
