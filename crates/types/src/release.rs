//! Release records

use crate::dist::ArtifactRecord;
use crate::version::Version;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single release of a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    /// Parsed version, `None` when the registry key is not a valid version
    pub version: Option<Version>,
    /// Earliest upload time among the release's files
    pub upload_time: Option<DateTime<Utc>>,
    pub yanked: bool,
    pub yanked_reason: Option<String>,
}

impl ReleaseRecord {
    /// Derive a release record from the files the registry lists for it
    ///
    /// A release with no files has no upload time and is not yanked. It is
    /// yanked when every file is yanked; the first yank reason found is kept.
    #[must_use]
    pub fn from_artifacts(version: &str, artifacts: &[ArtifactRecord]) -> Self {
        let upload_time = artifacts.iter().filter_map(|a| a.upload_time).min();
        let yanked = !artifacts.is_empty() && artifacts.iter().all(|a| a.yanked);
        let yanked_reason = if yanked {
            artifacts.iter().find_map(|a| a.yanked_reason.clone())
        } else {
            None
        };

        Self {
            version: Version::parse(version).ok(),
            upload_time,
            yanked,
            yanked_reason,
        }
    }
}
