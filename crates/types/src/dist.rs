//! Distribution artifact records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Declared distribution type of an artifact
///
/// Known registry tokens map to dedicated variants. Anything else is kept
/// verbatim in [`DistType::Other`] so new types survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DistType {
    /// `bdist_wheel`
    Wheel,
    /// `sdist`
    Sdist,
    /// `bdist_egg`
    Egg,
    /// `bdist_wininst`
    WinInst,
    /// `bdist_msi`
    Msi,
    /// `bdist_dmg`
    Dmg,
    /// `bdist_rpm`
    Rpm,
    /// `bdist_dumb`
    Dumb,
    /// Unrecognised registry token
    Other(String),
}

impl DistType {
    /// Registry token for this type
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Wheel => "bdist_wheel",
            Self::Sdist => "sdist",
            Self::Egg => "bdist_egg",
            Self::WinInst => "bdist_wininst",
            Self::Msi => "bdist_msi",
            Self::Dmg => "bdist_dmg",
            Self::Rpm => "bdist_rpm",
            Self::Dumb => "bdist_dumb",
            Self::Other(token) => token,
        }
    }

    #[must_use]
    pub fn is_wheel(&self) -> bool {
        matches!(self, Self::Wheel)
    }
}

impl Default for DistType {
    fn default() -> Self {
        Self::Wheel
    }
}

impl fmt::Display for DistType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "bdist_wheel" | "wheel" | "whl" => Self::Wheel,
            "sdist" | "source" => Self::Sdist,
            "bdist_egg" | "egg" => Self::Egg,
            "bdist_wininst" => Self::WinInst,
            "bdist_msi" => Self::Msi,
            "bdist_dmg" => Self::Dmg,
            "bdist_rpm" => Self::Rpm,
            "bdist_dumb" => Self::Dumb,
            _ => Self::Other(s.trim().to_string()),
        })
    }
}

impl Serialize for DistType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DistType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(token.parse().unwrap_or(Self::Other(token)))
    }
}

/// A single downloadable file of a release, as reported by the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub filename: String,
    pub url: String,
    #[serde(rename = "packagetype")]
    pub dist_type: DistType,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub md5_digest: Option<String>,
    #[serde(default, rename = "upload_time_iso_8601")]
    pub upload_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub requires_python: Option<String>,
    #[serde(default)]
    pub yanked: bool,
    #[serde(default)]
    pub yanked_reason: Option<String>,
}
