//! Network-related error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum NetworkError {
    #[error("connection timeout to {url}")]
    Timeout { url: String },

    #[error("download failed: {0}")]
    DownloadFailed(String),

    #[error("connection refused: {0}")]
    ConnectionRefused(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("unsupported protocol: {protocol}")]
    UnsupportedProtocol { protocol: String },

    #[error("HTTP error {status}: {message}")]
    HttpError { status: u16, message: String },

    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("no checksum advertised for {url}")]
    MissingChecksum { url: String },

    #[error("malformed checksum '{value}': {reason}")]
    MalformedChecksum { value: String, reason: String },

    #[error("rate limited: retry after {seconds} seconds")]
    RateLimited { seconds: u64 },
}

impl UserFacingError for NetworkError {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Self::ChecksumMismatch { expected, actual } => Cow::Owned(format!(
                "The file was corrupted during download (expected md5 {expected}, got {actual})"
            )),
            Self::Timeout { .. } | Self::ConnectionRefused(_) => {
                Cow::Owned(format!("Unable to reach the package registry: {self}"))
            }
            _ => Cow::Owned(self.to_string()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::ChecksumMismatch { .. } => Some("Please try the download again."),
            Self::Timeout { .. } | Self::ConnectionRefused(_) => {
                Some("Check your network connection or the configured registry URL.")
            }
            Self::RateLimited { .. } => Some("Wait a moment before retrying."),
            Self::MissingChecksum { .. } => {
                Some("The registry did not provide a checksum, so the file cannot be verified.")
            }
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. }
            | Self::DownloadFailed(_)
            | Self::ConnectionRefused(_)
            | Self::ChecksumMismatch { .. }
            | Self::RateLimited { .. } => true,
            Self::HttpError { status, .. } => *status >= 500,
            _ => false,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::Timeout { .. } => "network.timeout",
            Self::DownloadFailed(_) => "network.download_failed",
            Self::ConnectionRefused(_) => "network.connection_refused",
            Self::InvalidUrl(_) => "network.invalid_url",
            Self::UnsupportedProtocol { .. } => "network.unsupported_protocol",
            Self::HttpError { .. } => "network.http_error",
            Self::ChecksumMismatch { .. } => "network.checksum_mismatch",
            Self::MissingChecksum { .. } => "network.missing_checksum",
            Self::MalformedChecksum { .. } => "network.malformed_checksum",
            Self::RateLimited { .. } => "network.rate_limited",
        };
        Some(code)
    }
}
