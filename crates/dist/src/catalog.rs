//! Enumerated catalog of a release's distributions

use crate::tags::WheelTags;
use serde::Serialize;
use spout_errors::DistError;
use spout_types::{ArtifactRecord, DistType};
use std::fmt;

const MIB_THRESHOLD: u64 = 1_048_576;
const MIB_DIVISOR: f64 = 1.049e6;
const KIB_DIVISOR: f64 = 1024.0;

/// Unit used for a human-readable size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SizeUnit {
    #[serde(rename = "KiB")]
    Kib,
    #[serde(rename = "MiB")]
    Mib,
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kib => f.write_str("KiB"),
            Self::Mib => f.write_str("MiB"),
        }
    }
}

/// Cosmetic size for listings and progress lines
///
/// MiB above 1,048,576 bytes, KiB otherwise, truncated (never rounded up)
/// to one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HumanSize {
    pub value: f64,
    pub unit: SizeUnit,
}

impl HumanSize {
    #[must_use]
    pub fn from_bytes(bytes: u64) -> Self {
        let unit = if bytes > MIB_THRESHOLD {
            SizeUnit::Mib
        } else {
            SizeUnit::Kib
        };
        Self::in_unit(bytes, unit)
    }

    /// Express `bytes` in a fixed unit, so a running count can share the
    /// unit of its total
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn in_unit(bytes: u64, unit: SizeUnit) -> Self {
        let divisor = match unit {
            SizeUnit::Kib => KIB_DIVISOR,
            SizeUnit::Mib => MIB_DIVISOR,
        };
        let value = ((bytes as f64 / divisor) * 10.0).floor() / 10.0;
        Self { value, unit }
    }
}

impl fmt::Display for HumanSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} {}", self.value, self.unit)
    }
}

/// One annotated distribution in a catalog
#[derive(Debug, Clone, Serialize)]
pub struct CandidateEntry {
    /// 1-based display index
    pub index: usize,
    pub filename: String,
    pub url: String,
    pub dist_type: DistType,
    pub tags: Option<WheelTags>,
    pub size: u64,
    pub display_size: HumanSize,
    pub md5_digest: Option<String>,
    pub yanked: bool,
}

/// Ordered catalog of a release's distributions
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    entries: Vec<CandidateEntry>,
}

impl Catalog {
    #[must_use]
    pub fn entries(&self) -> &[CandidateEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its 1-based display index
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CandidateEntry> {
        index.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateEntry> {
        self.entries.iter()
    }

    /// Number of entries that parsed as wheels
    #[must_use]
    pub fn wheel_count(&self) -> usize {
        self.entries.iter().filter(|e| e.tags.is_some()).count()
    }

    /// Resolve a user's choice among the offered candidates
    ///
    /// # Errors
    ///
    /// Returns `DistError::InvalidChoice` if `choice` is not one of `offered`.
    pub fn choose(&self, choice: usize, offered: &[usize]) -> Result<&CandidateEntry, DistError> {
        let invalid = || DistError::InvalidChoice {
            choice,
            valid: offered
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        };
        if !offered.contains(&choice) {
            return Err(invalid());
        }
        self.get(choice).ok_or_else(invalid)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CandidateEntry;
    type IntoIter = std::slice::Iter<'a, CandidateEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Build the catalog for a release's artifacts, keeping input order
///
/// A filename that parses as a wheel is typed as a wheel with its tags
/// attached. Anything else keeps its declared type and has no tags.
#[must_use]
pub fn classify(artifacts: &[ArtifactRecord]) -> Catalog {
    let entries = artifacts
        .iter()
        .enumerate()
        .map(|(i, artifact)| {
            let tags = WheelTags::parse(&artifact.filename);
            let dist_type = if tags.is_some() {
                DistType::Wheel
            } else {
                artifact.dist_type.clone()
            };
            CandidateEntry {
                index: i + 1,
                filename: artifact.filename.clone(),
                url: artifact.url.clone(),
                dist_type,
                tags,
                size: artifact.size,
                display_size: HumanSize::from_bytes(artifact.size),
                md5_digest: artifact.md5_digest.clone(),
                yanked: artifact.yanked,
            }
        })
        .collect();

    Catalog { entries }
}
