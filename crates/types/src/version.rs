//! Release version parsing and ordering
//!
//! Versions follow the public version scheme used by Python package
//! registries:
//! - `1.2.3` - release segments, compared numerically with trailing zeros ignored
//! - `1!2.0` - explicit epoch
//! - `2.0a1`, `2.0b2`, `2.0rc1` - pre-releases
//! - `2.0.post1` - post-releases
//! - `2.0.dev3` - development releases
//! - `2.0+local.1` - local version label
//!
//! Two sentinels, [`Version::min`] and [`Version::max`], sort below and above
//! every parsed version so range bounds can always be compared.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use spout_errors::VersionError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        ^\s*v?
        (?:(?P<epoch>[0-9]+)!)?
        (?P<release>[0-9]+(?:\.[0-9]+)*)
        (?:[-_.]?(?P<pre_l>alpha|a|beta|b|preview|pre|c|rc)[-_.]?(?P<pre_n>[0-9]+)?)?
        (?:(?:-(?P<post_n1>[0-9]+))|(?:[-_.]?(?P<post_l>post|rev|r)[-_.]?(?P<post_n2>[0-9]+)?))?
        (?:[-_.]?(?P<dev_l>dev)[-_.]?(?P<dev_n>[0-9]+)?)?
        (?:\+(?P<local>[a-z0-9]+(?:[-_.][a-z0-9]+)*))?
        \s*$",
    )
    .expect("version pattern is a valid regex")
});

/// Pre-release phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreRelease {
    Alpha,
    Beta,
    Candidate,
}

impl PreRelease {
    fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "a" | "alpha" => Self::Alpha,
            "b" | "beta" => Self::Beta,
            _ => Self::Candidate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Bound {
    Min,
    Parsed,
    Max,
}

/// An ordered release version
#[derive(Debug, Clone)]
pub struct Version {
    bound: Bound,
    epoch: u64,
    release: Vec<u64>,
    pre: Option<(PreRelease, u64)>,
    post: Option<u64>,
    dev: Option<u64>,
    local: Option<String>,
    text: String,
}

impl Version {
    /// Parse a version string
    ///
    /// # Errors
    ///
    /// Returns `VersionError::InvalidVersion` if the input does not follow the
    /// public version scheme or a numeric component overflows.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let invalid = || VersionError::InvalidVersion {
            input: input.to_string(),
        };
        let caps = VERSION_PATTERN.captures(input).ok_or_else(invalid)?;

        let number = |name: &str| -> Result<Option<u64>, VersionError> {
            caps.name(name)
                .map(|m| m.as_str().parse::<u64>().map_err(|_| invalid()))
                .transpose()
        };

        let epoch = number("epoch")?.unwrap_or(0);
        let release = caps
            .name("release")
            .ok_or_else(invalid)?
            .as_str()
            .split('.')
            .map(|part| part.parse::<u64>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;

        let pre = match caps.name("pre_l") {
            Some(label) => Some((
                PreRelease::from_label(label.as_str()),
                number("pre_n")?.unwrap_or(0),
            )),
            None => None,
        };

        let post = if caps.name("post_n1").is_some() {
            number("post_n1")?
        } else if caps.name("post_l").is_some() {
            Some(number("post_n2")?.unwrap_or(0))
        } else {
            None
        };

        let dev = if caps.name("dev_l").is_some() {
            Some(number("dev_n")?.unwrap_or(0))
        } else {
            None
        };

        Ok(Self {
            bound: Bound::Parsed,
            epoch,
            release,
            pre,
            post,
            dev,
            local: caps.name("local").map(|m| m.as_str().to_ascii_lowercase()),
            text: input.trim().to_string(),
        })
    }

    /// A version that sorts below every parsed version
    #[must_use]
    pub fn min() -> Self {
        Self::sentinel(Bound::Min)
    }

    /// A version that sorts above every parsed version
    #[must_use]
    pub fn max() -> Self {
        Self::sentinel(Bound::Max)
    }

    fn sentinel(bound: Bound) -> Self {
        Self {
            bound,
            epoch: 0,
            release: Vec::new(),
            pre: None,
            post: None,
            dev: None,
            local: None,
            text: String::new(),
        }
    }

    /// Whether this is a pre-release or development release
    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some() || self.dev.is_some()
    }

    /// Epoch component (0 when not written)
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Release segments as written
    #[must_use]
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    /// The string this version was parsed from
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether this is a post-release
    #[must_use]
    pub fn is_postrelease(&self) -> bool {
        self.post.is_some()
    }

    /// Whether `other` shares this version's epoch and release segments
    pub(crate) fn same_release(&self, other: &Self) -> bool {
        self.epoch == other.epoch && self.cmp_release(other).is_eq()
    }

    /// This version with any local label dropped
    pub(crate) fn public(&self) -> Self {
        Self {
            local: None,
            ..self.clone()
        }
    }

    pub(crate) fn has_local(&self) -> bool {
        self.local.is_some()
    }

    fn cmp_release(&self, other: &Self) -> Ordering {
        let len = self.release.len().max(other.release.len());
        (0..len)
            .map(|i| {
                let a = self.release.get(i).copied().unwrap_or(0);
                let b = other.release.get(i).copied().unwrap_or(0);
                a.cmp(&b)
            })
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    // A bare dev release sorts before any pre-release of the same release.
    fn pre_key(&self) -> (u8, Option<(PreRelease, u64)>) {
        match (self.pre, self.post, self.dev) {
            (None, None, Some(_)) => (0, None),
            (Some(pre), _, _) => (1, Some(pre)),
            _ => (2, None),
        }
    }

    fn post_key(&self) -> (u8, u64) {
        self.post.map_or((0, 0), |n| (1, n))
    }

    fn dev_key(&self) -> (u8, u64) {
        self.dev.map_or((1, 0), |n| (0, n))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        // Two sentinels of the same kind are equal
        if self.bound != Bound::Parsed || other.bound != Bound::Parsed {
            return self.bound.cmp(&other.bound);
        }
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| self.cmp_release(other))
            .then_with(|| self.pre_key().cmp(&other.pre_key()))
            .then_with(|| self.post_key().cmp(&other.post_key()))
            .then_with(|| self.dev_key().cmp(&other.dev_key()))
            .then_with(|| self.local.cmp(&other.local))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bound {
            Bound::Min => write!(f, "<min>"),
            Bound::Max => write!(f, "<max>"),
            Bound::Parsed => write!(f, "{}", self.text),
        }
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
