//! Registry metadata error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum RegistryError {
    #[error("package not found: {name}")]
    PackageNotFound { name: String },

    #[error("release not found: {name} {version}")]
    ReleaseNotFound { name: String, version: String },

    #[error("invalid registry document: {message}")]
    InvalidDocument { message: String },
}

impl UserFacingError for RegistryError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::PackageNotFound { .. } => Some("Check the spelling of the package name."),
            Self::ReleaseNotFound { .. } => {
                Some("Run `spout releases <package>` to see the versions that exist.")
            }
            Self::InvalidDocument { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::PackageNotFound { .. } => "registry.package_not_found",
            Self::ReleaseNotFound { .. } => "registry.release_not_found",
            Self::InvalidDocument { .. } => "registry.invalid_document",
        };
        Some(code)
    }
}
