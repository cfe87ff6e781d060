use serde::{Deserialize, Serialize};

/// Registry query events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RegistryEvent {
    /// Metadata request sent
    FetchStarted { package: String, url: String },

    /// Metadata document received and decoded
    FetchCompleted {
        package: String,
        releases: usize,
        files: usize,
    },

    /// The `stable` selector was resolved to a concrete release
    StableResolved { package: String, version: String },

    /// A release key could not be parsed as a version
    UnparsableVersion { package: String, version: String },
}
