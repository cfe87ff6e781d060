//! Version parsing error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum VersionError {
    #[error("invalid version: {input}")]
    InvalidVersion { input: String },

    #[error("invalid date: {input} (expected YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("invalid version specifier: {input}")]
    InvalidSpecifier { input: String },
}

impl UserFacingError for VersionError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidVersion { .. } => {
                Some("Use a release version string such as 1.2.3, 2.0rc1 or 1!3.0.post1.")
            }
            Self::InvalidDate { .. } => Some("Dates are written as YYYY-MM-DD, e.g. 2021-06-15."),
            Self::InvalidSpecifier { .. } => {
                Some("Specifiers are comma-separated clauses such as >=3.8, !=3.9.*, <4.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::InvalidVersion { .. } => "version.invalid_version",
            Self::InvalidDate { .. } => "version.invalid_date",
            Self::InvalidSpecifier { .. } => "version.invalid_specifier",
        };
        Some(code)
    }
}
