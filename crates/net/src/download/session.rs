//! Shared progress state between a transfer and its reporter

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

/// Terminal state of a download
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStatus {
    InProgress,
    Success,
    ChecksumMismatch,
    TransportError,
}

const IN_PROGRESS: u8 = 0;
const SUCCESS: u8 = 1;
const CHECKSUM_MISMATCH: u8 = 2;
const TRANSPORT_ERROR: u8 = 3;

impl DownloadStatus {
    fn to_raw(self) -> u8 {
        match self {
            Self::InProgress => IN_PROGRESS,
            Self::Success => SUCCESS,
            Self::ChecksumMismatch => CHECKSUM_MISMATCH,
            Self::TransportError => TRANSPORT_ERROR,
        }
    }

    fn from_raw(raw: u8) -> Self {
        match raw {
            SUCCESS => Self::Success,
            CHECKSUM_MISMATCH => Self::ChecksumMismatch,
            TRANSPORT_ERROR => Self::TransportError,
            _ => Self::InProgress,
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != Self::InProgress
    }
}

/// Progress of one download
///
/// The transfer task is the only writer. The byte counter only grows and
/// the status moves from `InProgress` to exactly one terminal value. A
/// reporter that observes a terminal status also observes the final byte
/// count.
#[derive(Debug)]
pub struct DownloadSession {
    bytes: AtomicU64,
    total: AtomicU64,
    status: AtomicU8,
}

impl DownloadSession {
    #[must_use]
    pub fn new(total: u64) -> Self {
        Self {
            bytes: AtomicU64::new(0),
            total: AtomicU64::new(total),
            status: AtomicU8::new(IN_PROGRESS),
        }
    }

    #[must_use]
    pub fn bytes_transferred(&self) -> u64 {
        self.bytes.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn status(&self) -> DownloadStatus {
        DownloadStatus::from_raw(self.status.load(Ordering::Acquire))
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status().is_terminal()
    }

    pub(crate) fn add_bytes(&self, n: u64) {
        self.bytes.fetch_add(n, Ordering::Relaxed);
    }

    pub(crate) fn set_total(&self, total: u64) {
        self.total.store(total, Ordering::Relaxed);
    }

    /// Move to a terminal status; returns false if already finished
    pub(crate) fn finish(&self, status: DownloadStatus) -> bool {
        if !status.is_terminal() {
            return false;
        }
        self.status
            .compare_exchange(
                IN_PROGRESS,
                status.to_raw(),
                Ordering::Release,
                Ordering::Relaxed,
            )
            .is_ok()
    }
}

impl Default for DownloadSession {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_terminal_transition() {
        let session = DownloadSession::new(10);
        assert_eq!(session.status(), DownloadStatus::InProgress);
        assert!(!session.finish(DownloadStatus::InProgress));
        assert!(session.finish(DownloadStatus::ChecksumMismatch));
        assert!(!session.finish(DownloadStatus::Success));
        assert_eq!(session.status(), DownloadStatus::ChecksumMismatch);
    }

    #[test]
    fn test_counter_accumulates() {
        let session = DownloadSession::new(0);
        session.add_bytes(3072);
        session.add_bytes(100);
        session.set_total(5000);
        assert_eq!(session.bytes_transferred(), 3172);
        assert_eq!(session.total(), 5000);
        assert!(!session.is_finished());
    }
}
