//! Verified artifact downloads
//!
//! Streams a file to a `.part` sibling while hashing it, compares the MD5
//! with the server-advertised checksum and renames into place on match.

mod config;
mod core;
mod retry;
mod session;
mod stream;
mod validation;

pub use config::{ChecksumSource, DownloadOptions, DownloadRequest, DownloadResult};
pub use core::Downloader;
pub(crate) use retry::calculate_backoff_delay;
pub use session::{DownloadSession, DownloadStatus};
