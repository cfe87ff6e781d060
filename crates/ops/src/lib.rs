#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! High-level operations orchestration for spout
//!
//! This crate serves as the orchestration layer between the CLI and the
//! registry, selection and download crates.

mod context;
mod download;
mod query;
mod types;

pub use context::{OpsContextBuilder, OpsCtx};
pub use download::{
    download_distribution, execute_download, list_distributions, prepare_download, DistChooser,
    FixedChoice, NoPrompt,
};
pub use query::{list_extras, list_releases, package_info, package_notices, project_urls};
pub use types::{
    DistListing, DistQuery, DownloadReport, DownloadSpec, ExtrasListing, Notice, NoticeReport,
    PackageSummary, PreparedDownload, ProjectUrl, ReleaseEntry, ReleaseListing, UrlListing,
};

use spout_errors::Error;

/// Operation result that can be serialized for CLI output
#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "type", content = "data")]
pub enum OperationResult {
    /// Package summary
    PackageInfo(PackageSummary),
    /// Project links
    ProjectUrls(UrlListing),
    /// Installable extras
    Extras(ExtrasListing),
    /// Release notices
    Notices(NoticeReport),
    /// Release listing
    Releases(ReleaseListing),
    /// Distribution listing
    Distributions(DistListing),
    /// Completed download
    Download(DownloadReport),
}

impl OperationResult {
    /// Convert to JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the result cannot be serialized.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::internal(format!("failed to serialize result: {e}")))
    }
}
