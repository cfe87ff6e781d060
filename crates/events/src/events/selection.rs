use serde::{Deserialize, Serialize};
use spout_types::DistType;

/// Distribution selection events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SelectionEvent {
    /// Catalog built for a release
    CatalogBuilt {
        release: String,
        entries: usize,
        wheels: usize,
    },

    /// A tag pattern was given for a non-wheel type and ignored
    TagPatternIgnored {
        pattern: String,
        requested: DistType,
    },

    /// Exactly one candidate remained
    AutoSelected { index: usize, filename: String },

    /// Several candidates remain and the user has to choose
    DisambiguationRequired { candidates: Vec<usize> },

    /// User picked a candidate
    Chosen { index: usize, filename: String },
}
