//! Registry JSON document models

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use spout_errors::{Error, RegistryError};
use spout_types::{ArtifactRecord, ReleaseRecord};
use std::sync::LazyLock;

/// `extra == "name"` environment marker inside a requirement
static EXTRA_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"extra\s*==\s*["']([^"']+)["']"#).expect("extra marker is a valid regex")
});

static NAME_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_.]+").expect("name separator is a valid regex"));

/// Document returned by `{base}/{name}/json` or `{base}/{name}/{version}/json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageDocument {
    pub info: PackageInfo,
    /// Every release and its files, in registry order
    ///
    /// Release-specific documents omit this map.
    #[serde(default)]
    pub releases: IndexMap<String, Vec<ArtifactRecord>>,
    /// Files of the release described by `info`
    #[serde(default)]
    pub urls: Vec<ArtifactRecord>,
}

/// Package metadata block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    /// Latest non-prerelease version, or the requested one for release documents
    pub version: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
    #[serde(default)]
    pub maintainer: Option<String>,
    #[serde(default)]
    pub maintainer_email: Option<String>,
    #[serde(default)]
    pub home_page: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub requires_python: Option<String>,
    #[serde(default)]
    pub requires_dist: Option<Vec<String>>,
    /// Extras declared in the core metadata, when the registry reports them
    #[serde(default)]
    pub provides_extra: Option<Vec<String>>,
    #[serde(default)]
    pub project_urls: Option<IndexMap<String, String>>,
    #[serde(default)]
    pub package_url: Option<String>,
    #[serde(default)]
    pub yanked: bool,
    #[serde(default)]
    pub yanked_reason: Option<String>,
}

impl PackageInfo {
    /// Homepage, falling back to a `Homepage` project URL
    #[must_use]
    pub fn homepage(&self) -> Option<&str> {
        self.home_page
            .as_deref()
            .filter(|url| !url.is_empty())
            .or_else(|| self.project_url("homepage"))
    }

    /// `Documentation` project URL
    #[must_use]
    pub fn documentation(&self) -> Option<&str> {
        self.project_url("documentation")
    }

    fn project_url(&self, label: &str) -> Option<&str> {
        self.project_urls.as_ref().and_then(|urls| {
            urls.iter()
                .find(|(key, url)| key.eq_ignore_ascii_case(label) && !url.is_empty())
                .map(|(_, url)| url.as_str())
        })
    }

    /// Declared dependencies without environment markers on extras
    #[must_use]
    pub fn dependencies(&self) -> Vec<&str> {
        self.requires_dist
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|req| !EXTRA_MARKER.is_match(req))
            .collect()
    }

    /// Extras a release can be installed with, in first-seen order
    ///
    /// Collected from `provides_extra` and from the `extra == "..."` markers
    /// of `requires_dist`.
    #[must_use]
    pub fn extras(&self) -> Vec<String> {
        let declared = self.provides_extra.iter().flatten().cloned();
        let from_markers = self
            .requires_dist
            .iter()
            .flatten()
            .flat_map(|req| EXTRA_MARKER.captures_iter(req))
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());

        let mut extras: Vec<String> = Vec::new();
        for extra in declared.chain(from_markers) {
            if !extras.contains(&extra) {
                extras.push(extra);
            }
        }
        extras
    }

    /// Normalized project name: lowercase, separator runs collapsed to `-`
    #[must_use]
    pub fn canonical_name(&self) -> String {
        NAME_SEPARATORS
            .replace_all(&self.name, "-")
            .to_ascii_lowercase()
    }
}

impl PackageDocument {
    /// Parse a registry document from JSON
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidDocument` if the JSON does not match
    /// the expected shape.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| {
            RegistryError::InvalidDocument {
                message: format!("invalid package JSON: {e}"),
            }
            .into()
        })
    }

    /// Release map keyed by version string, in registry order
    #[must_use]
    pub fn release_map(&self) -> IndexMap<String, ReleaseRecord> {
        self.releases
            .iter()
            .map(|(version, files)| {
                (
                    version.clone(),
                    ReleaseRecord::from_artifacts(version, files),
                )
            })
            .collect()
    }

    /// Files of a release
    ///
    /// For the release described by `info` the `urls` list is used, so
    /// release-specific documents work as well.
    #[must_use]
    pub fn files_for(&self, version: &str) -> Option<&[ArtifactRecord]> {
        if version == self.info.version && !self.urls.is_empty() {
            return Some(&self.urls);
        }
        self.releases.get(version).map(Vec::as_slice)
    }

    /// Total number of files across all releases
    #[must_use]
    pub fn file_count(&self) -> usize {
        if self.releases.is_empty() {
            self.urls.len()
        } else {
            self.releases.values().map(Vec::len).sum()
        }
    }

    /// Upload record of the `info` release
    #[must_use]
    pub fn current_release(&self) -> ReleaseRecord {
        ReleaseRecord::from_artifacts(&self.info.version, &self.urls)
    }
}
