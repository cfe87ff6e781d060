//! Distribution selection error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum DistError {
    #[error("malformed wheel tag pattern '{pattern}': {reason}")]
    MalformedPattern { pattern: String, reason: String },

    #[error("no distributions found for {release} ({constraints})")]
    NoMatchingDistribution {
        release: String,
        constraints: String,
    },

    #[error("invalid selection {choice}: expected one of {valid}")]
    InvalidChoice { choice: usize, valid: String },

    #[error("{candidates} distributions match {release}; a choice is required")]
    AmbiguousSelection { release: String, candidates: usize },
}

impl UserFacingError for DistError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::MalformedPattern { .. } => Some(
                "Write the pattern as {build}-{python_tag}-{abi_tag}-{platform_tag}, using * as a wildcard.",
            ),
            Self::NoMatchingDistribution { .. } => {
                Some("Relax the distribution type or wheel pattern, or list distributions with --list.")
            }
            Self::InvalidChoice { .. } => Some("Pick one of the numbers shown in the listing."),
            Self::AmbiguousSelection { .. } => Some(
                "Narrow the choice with --dist or --whl-format, or run in an interactive terminal.",
            ),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::MalformedPattern { .. } => "dist.malformed_pattern",
            Self::NoMatchingDistribution { .. } => "dist.no_matching_distribution",
            Self::InvalidChoice { .. } => "dist.invalid_choice",
            Self::AmbiguousSelection { .. } => "dist.ambiguous_selection",
        };
        Some(code)
    }
}
