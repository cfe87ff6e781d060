//! Configuration structures for verified downloads

use spout_config::{DownloadConfig, NetworkConfig};
use spout_hash::Md5Digest;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for a verified download
#[derive(Clone, Debug)]
pub struct DownloadOptions {
    /// Bytes written per chunk, controls progress granularity
    pub chunk_size: usize,
    /// Timeout for an individual chunk to arrive
    pub chunk_timeout: Duration,
    /// Keep `<dest>.part` after a checksum mismatch
    pub keep_partial_on_mismatch: bool,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self::new(&DownloadConfig::default(), &NetworkConfig::default())
    }
}

impl DownloadOptions {
    #[must_use]
    pub fn new(download: &DownloadConfig, network: &NetworkConfig) -> Self {
        Self {
            chunk_size: download.chunk_size.max(1),
            chunk_timeout: network.connect_timeout(),
            keep_partial_on_mismatch: download.keep_partial_on_mismatch,
        }
    }
}

/// What to fetch and where to put it
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub url: String,
    pub destination: PathBuf,
    /// Registry-declared digest, used when the server sends no usable `ETag`
    pub fallback_md5: Option<String>,
}

/// Where the expected checksum came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumSource {
    Etag,
    Registry,
}

/// A verified, committed download
#[derive(Debug, Clone)]
pub struct DownloadResult {
    pub path: PathBuf,
    pub size: u64,
    pub md5: Md5Digest,
    pub checksum_source: ChecksumSource,
}
