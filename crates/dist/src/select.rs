//! Narrowing a catalog to a single target distribution

use crate::catalog::{CandidateEntry, Catalog};
use crate::tags::TagPattern;
use serde::Serialize;
use spout_types::DistType;

/// What the selector decided
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SelectionOutcome {
    /// Exactly one candidate remained (1-based index)
    AutoSelected(usize),
    /// More than one candidate remains; the caller must ask the user
    NeedsDisambiguation(Vec<usize>),
    NotFound,
}

/// Non-fatal remarks raised during selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SelectionWarning {
    /// A tag pattern was given for a type that has no tags
    TagPatternIgnored { pattern: String, requested: DistType },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub outcome: SelectionOutcome,
    pub warnings: Vec<SelectionWarning>,
}

/// Constraints applied to a catalog
#[derive(Debug, Clone, Default)]
pub struct SelectionRequest {
    /// `None` means any type
    pub dist_type: Option<DistType>,
    /// Only applied to wheels
    pub pattern: Option<TagPattern>,
}

impl SelectionRequest {
    #[must_use]
    pub fn new(dist_type: Option<DistType>, pattern: Option<TagPattern>) -> Self {
        Self { dist_type, pattern }
    }

    fn applies_tags(&self) -> bool {
        self.pattern.is_some() && self.dist_type.as_ref().is_none_or(DistType::is_wheel)
    }

    fn accepts(&self, entry: &CandidateEntry) -> bool {
        if let Some(wanted) = &self.dist_type {
            if &entry.dist_type != wanted {
                return false;
            }
        }
        match (&self.pattern, &entry.tags) {
            (Some(pattern), Some(tags)) if self.applies_tags() => pattern.matches(tags),
            _ => true,
        }
    }

    /// Human-readable summary, used when nothing matched
    #[must_use]
    pub fn describe(&self) -> String {
        let mut parts = vec![format!(
            "type: {}",
            self.dist_type
                .as_ref()
                .map_or_else(|| "any".to_string(), ToString::to_string)
        )];
        if let Some(pattern) = &self.pattern {
            if self.applies_tags() {
                parts.push(format!("wheel tags: {pattern}"));
            }
        }
        parts.join(", ")
    }
}

/// Narrow `catalog` under `request`
///
/// Pure and deterministic: the same catalog and request always produce the
/// same selection.
#[must_use]
pub fn select(catalog: &Catalog, request: &SelectionRequest) -> Selection {
    let mut warnings = Vec::new();
    if let (Some(pattern), Some(requested)) = (&request.pattern, &request.dist_type) {
        if !requested.is_wheel() {
            warnings.push(SelectionWarning::TagPatternIgnored {
                pattern: pattern.to_string(),
                requested: requested.clone(),
            });
        }
    }

    let candidates: Vec<usize> = catalog
        .iter()
        .filter(|entry| request.accepts(entry))
        .map(|entry| entry.index)
        .collect();

    let outcome = match candidates.as_slice() {
        [] => SelectionOutcome::NotFound,
        [only] => SelectionOutcome::AutoSelected(*only),
        _ => SelectionOutcome::NeedsDisambiguation(candidates),
    };

    Selection { outcome, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::classify;
    use spout_types::ArtifactRecord;

    fn artifact(filename: &str, dist_type: DistType, size: u64) -> ArtifactRecord {
        ArtifactRecord {
            filename: filename.into(),
            url: format!("https://files.example/{filename}"),
            dist_type,
            size,
            md5_digest: None,
            upload_time: None,
            requires_python: None,
            yanked: false,
            yanked_reason: None,
        }
    }

    fn sample() -> Catalog {
        classify(&[
            artifact("pkg-1.0-py3-none-any.whl", DistType::Wheel, 2_000_000),
            artifact("pkg-1.0.tar.gz", DistType::Sdist, 500_000),
        ])
    }

    #[test]
    fn test_sdist_auto_selected() {
        let catalog = sample();
        let selection = select(&catalog, &SelectionRequest::new(Some(DistType::Sdist), None));
        assert_eq!(selection.outcome, SelectionOutcome::AutoSelected(2));
        let entry = catalog.get(2).unwrap();
        assert_eq!(entry.filename, "pkg-1.0.tar.gz");
        assert_eq!(entry.display_size.to_string(), "488.2 KiB");
    }

    #[test]
    fn test_any_type_with_two_entries_needs_choice() {
        let selection = select(&sample(), &SelectionRequest::default());
        assert_eq!(
            selection.outcome,
            SelectionOutcome::NeedsDisambiguation(vec![1, 2])
        );
    }

    #[test]
    fn test_pattern_on_sdist_warns_and_is_ignored() {
        let request = SelectionRequest::new(
            Some(DistType::Sdist),
            Some(TagPattern::parse("*-cp39-*-*").unwrap()),
        );
        let selection = select(&sample(), &request);
        assert_eq!(selection.outcome, SelectionOutcome::AutoSelected(2));
        assert_eq!(selection.warnings.len(), 1);
        assert_eq!(request.describe(), "type: sdist");
    }

    #[test]
    fn test_no_match() {
        let request = SelectionRequest::new(Some(DistType::Egg), None);
        assert_eq!(select(&sample(), &request).outcome, SelectionOutcome::NotFound);
    }

    #[test]
    fn test_pattern_under_any_type_spares_non_wheels() {
        let request = SelectionRequest::new(None, Some(TagPattern::parse("*-cp39-*-*").unwrap()));
        // The pure wheel has `none`/`any` abi and platform but python tag py3
        let selection = select(&sample(), &request);
        assert_eq!(selection.outcome, SelectionOutcome::AutoSelected(2));
        assert!(selection.warnings.is_empty());
    }
}
