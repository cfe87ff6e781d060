#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Registry metadata for spout
//!
//! This crate models the package documents served by the registry and
//! filters a package's release map by version and upload date.

mod models;
mod range;

pub use models::{PackageDocument, PackageInfo};
pub use range::{filter_releases, parse_date, ReleaseBounds};

/// Target release selector meaning "latest non-prerelease"
pub const STABLE: &str = "stable";

/// Whether a requested release is the `stable` selector
#[must_use]
pub fn is_stable_selector(release: &str) -> bool {
    release.eq_ignore_ascii_case(STABLE)
}
