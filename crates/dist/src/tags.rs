//! Wheel filename tags and user tag patterns

use regex::Regex;
use serde::{Deserialize, Serialize};
use spout_errors::DistError;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static WHEEL_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<project>[A-Za-z0-9](?:[A-Za-z0-9._]*[A-Za-z0-9])?)-(?P<version>[A-Za-z0-9_.!+]+)(?:-(?P<build>[0-9][\w.]*))?-(?P<python>[\w]+(?:\.[\w]+)*)-(?P<abi>[\w]+(?:\.[\w]+)*)-(?P<platform>[\w]+(?:\.[\w]+)*)\.[Ww][Hh][Ll]$",
    )
    .expect("wheel filename pattern is a valid regex")
});

/// Tags embedded in a wheel filename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelTags {
    pub project: String,
    pub version: String,
    pub build: Option<String>,
    pub python_tag: String,
    pub abi_tag: String,
    pub platform_tag: String,
}

impl WheelTags {
    /// Parse `{project}-{version}[-{build}]-{python}-{abi}-{platform}.whl`
    ///
    /// Returns `None` for anything that is not a wheel filename. That is a
    /// classification signal, not an error.
    #[must_use]
    pub fn parse(filename: &str) -> Option<Self> {
        let caps = WHEEL_FILENAME.captures(filename)?;
        let field = |name: &str| caps.name(name).map(|m| m.as_str().to_string());

        Some(Self {
            project: field("project")?,
            version: field("version")?,
            build: field("build"),
            python_tag: field("python")?,
            abi_tag: field("abi")?,
            platform_tag: field("platform")?,
        })
    }
}

/// Parse a wheel filename into its tags
#[must_use]
pub fn parse_wheel_filename(filename: &str) -> Option<WheelTags> {
    WheelTags::parse(filename)
}

/// One segment of a [`TagPattern`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagField {
    /// `*`, accepts any value including an absent one
    Any,
    /// Exact, case-sensitive value
    Literal(String),
}

impl TagField {
    // A candidate value that is absent, `none` or `any` is unconstrained.
    fn accepts(&self, candidate: Option<&str>) -> bool {
        let Some(value) = candidate else {
            return true;
        };
        if value.is_empty()
            || value.eq_ignore_ascii_case("none")
            || value.eq_ignore_ascii_case("any")
        {
            return true;
        }
        match self {
            Self::Any => true,
            Self::Literal(expected) => expected == value,
        }
    }
}

impl fmt::Display for TagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Literal(value) => f.write_str(value),
        }
    }
}

/// A user-supplied `{build}-{python}-{abi}-{platform}` match specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    pub build: TagField,
    pub python_tag: TagField,
    pub abi_tag: TagField,
    pub platform_tag: TagField,
}

impl TagPattern {
    /// A pattern that matches every wheel
    #[must_use]
    pub fn any() -> Self {
        Self {
            build: TagField::Any,
            python_tag: TagField::Any,
            abi_tag: TagField::Any,
            platform_tag: TagField::Any,
        }
    }

    /// Parse a pattern such as `*-cp311-cp311-manylinux_2_17_x86_64`
    ///
    /// # Errors
    ///
    /// Returns `DistError::MalformedPattern` echoing the input when it does
    /// not have exactly four non-empty dash-separated segments.
    pub fn parse(text: &str) -> Result<Self, DistError> {
        let malformed = |reason: String| DistError::MalformedPattern {
            pattern: text.to_string(),
            reason,
        };

        let segments: Vec<&str> = text.trim().split('-').collect();
        if segments.len() != 4 {
            return Err(malformed(format!(
                "expected 4 dash-separated segments (build-python-abi-platform), found {}",
                segments.len()
            )));
        }

        let mut fields = Vec::with_capacity(4);
        for (position, segment) in segments.iter().enumerate() {
            let field = match *segment {
                "" => return Err(malformed(format!("segment {} is empty", position + 1))),
                "*" => TagField::Any,
                literal if literal.contains('*') => {
                    return Err(malformed(format!(
                        "segment {} mixes '*' with text; use '*' alone",
                        position + 1
                    )))
                }
                literal => TagField::Literal(literal.to_string()),
            };
            fields.push(field);
        }

        let mut fields = fields.into_iter();
        match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(build), Some(python_tag), Some(abi_tag), Some(platform_tag)) => Ok(Self {
                build,
                python_tag,
                abi_tag,
                platform_tag,
            }),
            _ => Err(malformed("expected 4 segments".to_string())),
        }
    }

    /// Field-by-field match against a wheel's tags
    #[must_use]
    pub fn matches(&self, tags: &WheelTags) -> bool {
        self.build.accepts(tags.build.as_deref())
            && self.python_tag.accepts(Some(&tags.python_tag))
            && self.abi_tag.accepts(Some(&tags.abi_tag))
            && self.platform_tag.accepts(Some(&tags.platform_tag))
    }
}

impl FromStr for TagPattern {
    type Err = DistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TagPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.build, self.python_tag, self.abi_tag, self.platform_tag
        )
    }
}
