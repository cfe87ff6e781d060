use serde::{Deserialize, Serialize};
use spout_types::DistType;
use std::path::PathBuf;

/// Download-specific events
///
/// Live byte counts are not sent as events; the progress reporter polls the
/// shared download session instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DownloadEvent {
    /// Download started
    Started {
        url: String,
        filename: String,
        dist_type: DistType,
        total_size: u64,
    },

    /// Transport attempt failed and will be retried
    Retrying {
        url: String,
        attempt: u32,
        max_attempts: u32,
        reason: String,
    },

    /// Hash verification started
    HashVerificationStarted { url: String, expected: String },

    /// Hash mismatch detected
    HashMismatch {
        url: String,
        expected: String,
        actual: String,
        partial_kept: bool,
    },

    /// Download verified and committed to its destination
    Completed {
        url: String,
        destination: PathBuf,
        bytes: u64,
        md5: String,
    },

    /// Download failed in transport
    Failed { url: String, error: String },
}
