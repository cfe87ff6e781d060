//! Release range filtering by version and upload date

use chrono::NaiveDate;
use indexmap::IndexMap;
use spout_errors::VersionError;
use spout_types::{ReleaseRecord, Version};

/// Inclusive version and date bounds
///
/// Missing version bounds are the `Version::min()`/`Version::max()`
/// sentinels, so comparisons are always defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseBounds {
    pub after_version: Version,
    pub before_version: Version,
    pub after_date: Option<NaiveDate>,
    pub before_date: Option<NaiveDate>,
}

impl Default for ReleaseBounds {
    fn default() -> Self {
        Self {
            after_version: Version::min(),
            before_version: Version::max(),
            after_date: None,
            before_date: None,
        }
    }
}

impl ReleaseBounds {
    /// Build bounds from user-supplied strings
    ///
    /// # Errors
    ///
    /// Returns `VersionError::InvalidVersion` or `VersionError::InvalidDate`
    /// for the first bound that does not parse.
    pub fn parse(
        after_version: Option<&str>,
        before_version: Option<&str>,
        after_date: Option<&str>,
        before_date: Option<&str>,
    ) -> Result<Self, VersionError> {
        Ok(Self {
            after_version: after_version
                .map(Version::parse)
                .transpose()?
                .unwrap_or_else(Version::min),
            before_version: before_version
                .map(Version::parse)
                .transpose()?
                .unwrap_or_else(Version::max),
            after_date: after_date.map(parse_date).transpose()?,
            before_date: before_date.map(parse_date).transpose()?,
        })
    }

    fn has_version_bound(&self) -> bool {
        self.after_version != Version::min() || self.before_version != Version::max()
    }

    fn has_date_bound(&self) -> bool {
        self.after_date.is_some() || self.before_date.is_some()
    }

    /// Whether a single release falls inside the bounds
    #[must_use]
    pub fn contains(&self, record: &ReleaseRecord) -> bool {
        let version_ok = match &record.version {
            Some(version) => self.after_version <= *version && *version <= self.before_version,
            // Unparsable keys only pass when no version bound is active
            None => !self.has_version_bound(),
        };
        if !version_ok {
            return false;
        }

        if !self.has_date_bound() {
            return true;
        }
        let Some(uploaded) = record.upload_time.map(|t| t.date_naive()) else {
            return false;
        };
        self.after_date.is_none_or(|after| after <= uploaded)
            && self.before_date.is_none_or(|before| uploaded <= before)
    }
}

/// Parse a `YYYY-MM-DD` date
///
/// # Errors
///
/// Returns `VersionError::InvalidDate` if the input is not a calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate, VersionError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| VersionError::InvalidDate {
        input: input.to_string(),
    })
}

/// Releases inside `bounds`, in the input map's order
///
/// Yanked releases are kept; the caller flags them for display.
#[must_use]
pub fn filter_releases<'a>(
    releases: &'a IndexMap<String, ReleaseRecord>,
    bounds: &ReleaseBounds,
) -> Vec<(&'a str, &'a ReleaseRecord)> {
    releases
        .iter()
        .filter(|(_, record)| bounds.contains(record))
        .map(|(version, record)| (version.as_str(), record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(version: &str, date: Option<(i32, u32, u32)>, yanked: bool) -> ReleaseRecord {
        ReleaseRecord {
            version: Version::parse(version).ok(),
            upload_time: date.map(|(y, m, d)| Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()),
            yanked,
            yanked_reason: None,
        }
    }

    fn releases() -> IndexMap<String, ReleaseRecord> {
        let mut map = IndexMap::new();
        map.insert("1.0".to_string(), record("1.0", Some((2020, 1, 1)), false));
        map.insert("2.0".to_string(), record("2.0", Some((2021, 6, 15)), false));
        map
    }

    #[test]
    fn test_date_window() {
        let bounds = ReleaseBounds::parse(None, None, Some("2020-06-01"), Some("2021-12-31")).unwrap();
        let releases = releases();
        let matched: Vec<_> = filter_releases(&releases, &bounds)
            .into_iter()
            .map(|(v, _)| v)
            .collect();
        assert_eq!(matched, vec!["2.0"]);
    }

    #[test]
    fn test_date_bounds_are_inclusive_days() {
        let bounds = ReleaseBounds::parse(None, None, Some("2021-06-15"), Some("2021-06-15")).unwrap();
        let releases = releases();
        assert_eq!(filter_releases(&releases, &bounds).len(), 1);
    }

    #[test]
    fn test_missing_timestamp_excluded_under_date_bound() {
        let mut releases = releases();
        releases.insert("3.0".to_string(), record("3.0", None, false));

        let unbounded = ReleaseBounds::default();
        assert_eq!(filter_releases(&releases, &unbounded).len(), 3);

        let dated = ReleaseBounds::parse(None, None, Some("2000-01-01"), None).unwrap();
        assert_eq!(filter_releases(&releases, &dated).len(), 2);
    }

    #[test]
    fn test_unparsable_version_only_without_version_bound() {
        let mut releases = releases();
        releases.insert("nightly".to_string(), record("nightly", Some((2022, 1, 1)), false));

        assert_eq!(filter_releases(&releases, &ReleaseBounds::default()).len(), 3);
        let bounded = ReleaseBounds::parse(Some("0.1"), None, None, None).unwrap();
        assert_eq!(filter_releases(&releases, &bounded).len(), 2);
    }

    #[test]
    fn test_yanked_kept() {
        let mut releases = releases();
        releases.insert("2.1".to_string(), record("2.1", Some((2021, 7, 1)), true));
        let bounds = ReleaseBounds::parse(Some("2.0"), Some("2.1"), None, None).unwrap();
        let matched = filter_releases(&releases, &bounds);
        assert_eq!(matched.len(), 2);
        assert!(matched[1].1.yanked);
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(matches!(
            ReleaseBounds::parse(None, None, Some("15/06/2021"), None),
            Err(VersionError::InvalidDate { .. })
        ));
        assert!(matches!(
            ReleaseBounds::parse(Some("newest"), None, None, None),
            Err(VersionError::InvalidVersion { .. })
        ));
    }
}
