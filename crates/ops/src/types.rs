//! Types for operations and results

use chrono::NaiveDate;
use serde::Serialize;
use spout_dist::{CandidateEntry, SelectionRequest};
use spout_types::DistType;
use std::path::PathBuf;

/// Package summary shown by `info`
#[derive(Clone, Debug, Serialize)]
pub struct PackageSummary {
    pub name: String,
    pub version: String,
    pub summary: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub homepage: Option<String>,
    pub documentation: Option<String>,
    pub license: Option<String>,
    pub requires_python: Option<String>,
    pub author: Option<String>,
    pub author_email: Option<String>,
    /// Falls back to the author when no maintainer is listed
    pub maintainer: Option<String>,
    pub maintainer_email: Option<String>,
    pub package_url: Option<String>,
    pub dependencies: Vec<String>,
    pub yanked: bool,
    pub yanked_reason: Option<String>,
}

/// A labelled project link
#[derive(Clone, Debug, Serialize)]
pub struct ProjectUrl {
    pub label: String,
    pub url: String,
}

/// Project links of a release
#[derive(Clone, Debug, Serialize)]
pub struct UrlListing {
    pub package: String,
    pub version: String,
    pub urls: Vec<ProjectUrl>,
}

/// Extras a release can be installed with
#[derive(Clone, Debug, Serialize)]
pub struct ExtrasListing {
    pub package: String,
    pub version: String,
    /// Normalized name used in `name[extra]` requirements
    pub canonical_name: String,
    pub extras: Vec<String>,
}

/// Something a user should know before installing a release
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    Yanked {
        reason: Option<String>,
    },
    IncompatiblePython {
        requires: String,
        current: String,
    },
}

/// Notices for one release; empty when there is nothing to report
#[derive(Clone, Debug, Serialize)]
pub struct NoticeReport {
    pub package: String,
    pub version: String,
    /// Interpreter version `requires_python` was checked against
    pub python: Option<String>,
    pub notices: Vec<Notice>,
}

/// One row of a release listing
#[derive(Clone, Debug, Serialize)]
pub struct ReleaseEntry {
    pub version: String,
    pub upload_date: Option<NaiveDate>,
    pub yanked: bool,
    pub yanked_reason: Option<String>,
}

/// Releases of a package within the requested bounds
#[derive(Clone, Debug, Serialize)]
pub struct ReleaseListing {
    pub package: String,
    pub releases: Vec<ReleaseEntry>,
}

/// Distributions of one release
#[derive(Clone, Debug, Serialize)]
pub struct DistListing {
    pub package: String,
    pub version: String,
    pub entries: Vec<CandidateEntry>,
}

/// Which release's distributions to look at, and how to narrow them
#[derive(Clone, Debug)]
pub struct DistQuery {
    pub package: String,
    /// A version string, or `stable` for the latest non-prerelease
    pub release: String,
    pub request: SelectionRequest,
}

/// A distribution download request
#[derive(Clone, Debug)]
pub struct DownloadSpec {
    pub query: DistQuery,
    /// Destination file, or a directory to place the upstream filename in
    pub output: Option<PathBuf>,
}

/// A selected distribution, ready to be fetched
#[derive(Clone, Debug, Serialize)]
pub struct PreparedDownload {
    pub package: String,
    pub version: String,
    pub entry: CandidateEntry,
    pub destination: PathBuf,
}

impl PreparedDownload {
    #[must_use]
    pub fn dist_type(&self) -> &DistType {
        &self.entry.dist_type
    }
}

/// A completed, verified download
#[derive(Clone, Debug, Serialize)]
pub struct DownloadReport {
    pub package: String,
    pub version: String,
    pub filename: String,
    pub dist_type: DistType,
    pub path: PathBuf,
    pub size: u64,
    pub md5: String,
    /// `etag` or `registry`
    pub verified_by: String,
}
