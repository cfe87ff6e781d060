use serde::{Deserialize, Serialize};

use spout_errors::UserFacingError;

/// Structured failure information shared across domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    /// Optional remediation hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether retrying the operation might succeed.
    pub retryable: bool,
}

impl FailureContext {
    /// Construct a new failure context.
    #[must_use]
    pub fn new(
        code: Option<impl Into<String>>,
        message: impl Into<String>,
        hint: Option<impl Into<String>>,
        retryable: bool,
    ) -> Self {
        Self {
            code: code.map(Into::into),
            message: message.into(),
            hint: hint.map(Into::into),
            retryable,
        }
    }

    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self::new(
            error.user_code(),
            error.user_message().into_owned(),
            error.user_hint(),
            error.is_retryable(),
        )
    }
}

pub mod download;
pub mod general;
pub mod registry;
pub mod selection;

pub use download::*;
pub use general::*;
pub use registry::*;
pub use selection::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General utility events (warnings, operations)
    General(GeneralEvent),

    /// Registry metadata queries
    Registry(RegistryEvent),

    /// Catalog and candidate selection
    Selection(SelectionEvent),

    /// Artifact transfer and verification
    Download(DownloadEvent),
}

impl AppEvent {
    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::General(GeneralEvent::OperationFailed { .. })
            | Self::Download(DownloadEvent::HashMismatch { .. } | DownloadEvent::Failed { .. }) => {
                Level::ERROR
            }

            Self::General(GeneralEvent::Warning { .. })
            | Self::Selection(SelectionEvent::TagPatternIgnored { .. })
            | Self::Registry(RegistryEvent::UnparsableVersion { .. })
            | Self::Download(DownloadEvent::Retrying { .. }) => Level::WARN,

            Self::General(GeneralEvent::DebugLog { .. })
            | Self::Registry(RegistryEvent::FetchStarted { .. })
            | Self::Selection(SelectionEvent::CatalogBuilt { .. })
            | Self::Download(DownloadEvent::HashVerificationStarted { .. }) => Level::DEBUG,

            _ => Level::INFO,
        }
    }

    /// Get the log target for this event (for structured logging)
    #[must_use]
    pub fn log_target(&self) -> &'static str {
        match self {
            Self::General(_) => "spout::events::general",
            Self::Registry(_) => "spout::events::registry",
            Self::Selection(_) => "spout::events::selection",
            Self::Download(_) => "spout::events::download",
        }
    }

    /// Get structured fields for logging
    #[must_use]
    pub fn log_fields(&self) -> String {
        format!("{self:?}")
    }
}
