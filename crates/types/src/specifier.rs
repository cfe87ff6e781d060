//! Version specifiers such as `>=3.8, !=3.9.*, <4`
//!
//! Used to test an interpreter version against a release's
//! `requires_python`. Pre-release candidates are compared like any other
//! version; there is no pre-release exclusion.

use crate::version::Version;
use spout_errors::VersionError;
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a single clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `~=`
    Compatible,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `===`
    Arbitrary,
}

impl Operator {
    // Longest tokens first so `===` is not read as `==`
    const TOKENS: [(&'static str, Self); 8] = [
        ("===", Self::Arbitrary),
        ("~=", Self::Compatible),
        ("==", Self::Equal),
        ("!=", Self::NotEqual),
        ("<=", Self::LessEqual),
        (">=", Self::GreaterEqual),
        ("<", Self::Less),
        (">", Self::Greater),
    ];

    fn split(clause: &str) -> Option<(Self, &str)> {
        Self::TOKENS
            .iter()
            .find_map(|(token, op)| clause.strip_prefix(token).map(|rest| (*op, rest.trim())))
    }
}

/// One clause: an operator and the version it compares against
#[derive(Debug, Clone)]
pub struct Specifier {
    op: Operator,
    version: Option<Version>,
    /// `==1.4.*` / `!=1.4.*`
    wildcard: bool,
    text: String,
}

impl Specifier {
    /// Parse one clause
    ///
    /// # Errors
    ///
    /// Returns `VersionError::InvalidSpecifier` for an unknown operator, a
    /// malformed version, a wildcard on an operator other than `==`/`!=`, or
    /// a `~=` clause with a single release segment.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let invalid = || VersionError::InvalidSpecifier {
            input: input.to_string(),
        };
        let clause = input.trim();
        let (op, operand) = Operator::split(clause).ok_or_else(invalid)?;
        if operand.is_empty() {
            return Err(invalid());
        }

        if op == Operator::Arbitrary {
            return Ok(Self {
                op,
                version: None,
                wildcard: false,
                text: operand.to_string(),
            });
        }

        let (operand, wildcard) = match operand.strip_suffix(".*") {
            Some(prefix) if matches!(op, Operator::Equal | Operator::NotEqual) => (prefix, true),
            Some(_) => return Err(invalid()),
            None => (operand, false),
        };

        let version = Version::parse(operand).map_err(|_| invalid())?;
        if op == Operator::Compatible && version.release().len() < 2 {
            return Err(invalid());
        }

        Ok(Self {
            op,
            version: Some(version),
            wildcard,
            text: operand.to_string(),
        })
    }

    /// Whether `candidate` satisfies this clause
    #[must_use]
    pub fn contains(&self, candidate: &Version) -> bool {
        let Some(version) = &self.version else {
            return candidate.as_str().eq_ignore_ascii_case(&self.text);
        };

        match self.op {
            Operator::Equal if self.wildcard => {
                release_prefix_matches(candidate, version.release(), version)
            }
            Operator::NotEqual if self.wildcard => {
                !release_prefix_matches(candidate, version.release(), version)
            }
            Operator::Equal => equal_ignoring_local(candidate, version),
            Operator::NotEqual => !equal_ignoring_local(candidate, version),
            Operator::LessEqual => candidate.public() <= *version,
            Operator::GreaterEqual => candidate.public() >= *version,
            Operator::Less => {
                candidate < version
                    && !(candidate.is_prerelease()
                        && !version.is_prerelease()
                        && candidate.same_release(version))
            }
            Operator::Greater => {
                candidate > version
                    && !(candidate.is_postrelease()
                        && !version.is_postrelease()
                        && candidate.same_release(version))
                    && !(candidate.has_local() && candidate.public() == *version)
            }
            Operator::Compatible => {
                let release = version.release();
                candidate.public() >= *version
                    && release_prefix_matches(candidate, &release[..release.len() - 1], version)
            }
            Operator::Arbitrary => false,
        }
    }
}

fn equal_ignoring_local(candidate: &Version, version: &Version) -> bool {
    if version.has_local() {
        candidate == version
    } else {
        candidate.public() == *version
    }
}

/// `candidate`'s release, zero-padded, starts with `prefix`
fn release_prefix_matches(candidate: &Version, prefix: &[u64], version: &Version) -> bool {
    candidate.epoch() == version.epoch()
        && prefix
            .iter()
            .enumerate()
            .all(|(i, segment)| candidate.release().get(i).copied().unwrap_or(0) == *segment)
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = Operator::TOKENS
            .iter()
            .find(|(_, op)| *op == self.op)
            .map_or("", |(token, _)| *token);
        let suffix = if self.wildcard { ".*" } else { "" };
        write!(f, "{op}{}{suffix}", self.text)
    }
}

/// Comma-separated clauses, all of which must hold
///
/// An empty set accepts every version.
#[derive(Debug, Clone)]
pub struct SpecifierSet {
    specifiers: Vec<Specifier>,
}

impl SpecifierSet {
    /// Parse a comma-separated specifier list
    ///
    /// # Errors
    ///
    /// Returns `VersionError::InvalidSpecifier` naming the whole input if
    /// any clause is malformed.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let specifiers = input
            .split(',')
            .map(str::trim)
            .filter(|clause| !clause.is_empty())
            .map(Specifier::parse)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| VersionError::InvalidSpecifier {
                input: input.to_string(),
            })?;
        Ok(Self { specifiers })
    }

    #[must_use]
    pub fn contains(&self, candidate: &Version) -> bool {
        self.specifiers.iter().all(|spec| spec.contains(candidate))
    }
}

impl fmt::Display for SpecifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, spec) in self.specifiers.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{spec}")?;
        }
        Ok(())
    }
}

impl FromStr for SpecifierSet {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn allows(set: &str, version: &str) -> bool {
        SpecifierSet::parse(set).unwrap().contains(&v(version))
    }

    #[test]
    fn test_typical_requires_python() {
        assert!(allows(">=3.8", "3.11.4"));
        assert!(!allows(">=3.8", "3.7.17"));
        assert!(allows(">=3.7, <4", "3.12.0"));
        assert!(!allows(">=3.7, <4", "4.0"));
        assert!(allows("", "2.7.18"));
    }

    #[test]
    fn test_wildcards() {
        let set = ">=2.7, !=3.0.*, !=3.1.*, !=3.2.*, !=3.3.*";
        assert!(allows(set, "2.7.18"));
        assert!(!allows(set, "3.2.5"));
        assert!(allows(set, "3.4.0"));
        assert!(allows("==3.*", "3.12.1"));
        assert!(!allows("==3.*", "2.7"));
    }

    #[test]
    fn test_compatible_release() {
        assert!(allows("~=3.8", "3.12"));
        assert!(!allows("~=3.8", "4.0"));
        assert!(allows("~=3.8.1", "3.8.9"));
        assert!(!allows("~=3.8.1", "3.9.0"));
    }

    #[test]
    fn test_exclusive_bounds_skip_same_release_variants() {
        assert!(!allows("<3.12", "3.12.0rc1"));
        assert!(allows("<3.12", "3.11.9"));
        assert!(!allows(">3.8", "3.8.post1"));
        assert!(allows(">3.8", "3.8.1"));
    }

    #[test]
    fn test_equality_ignores_candidate_local_label() {
        assert!(allows("==3.11.4", "3.11.4+custom"));
        assert!(allows("!=3.11.4", "3.11.5"));
        assert!(allows("===3.11.4", "3.11.4"));
        assert!(!allows("===3.11.4", "3.11.4.0"));
    }

    #[test]
    fn test_malformed_specifiers() {
        for input in ["3.8", ">=", ">=three", "~=3", "<3.*", ">=3.8,, =<4"] {
            assert!(
                matches!(
                    SpecifierSet::parse(input),
                    Err(VersionError::InvalidSpecifier { .. })
                ),
                "{input}"
            );
        }
    }

    #[test]
    fn test_display() {
        let set = SpecifierSet::parse(" >=3.7 ,!=3.9.*").unwrap();
        assert_eq!(set.to_string(), ">=3.7, !=3.9.*");
    }
}
