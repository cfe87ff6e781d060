//! CLI error handling

use std::fmt;

use spout_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Configuration error
    Config(spout_errors::ConfigError),
    /// Operations error
    Ops(spout_errors::Error),
    /// Invalid command arguments
    InvalidArguments(String),
    /// I/O error
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "Configuration error: {e}"),
            CliError::Ops(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                if e.is_retryable() {
                    write!(f, "\n  Retry: safe to retry this operation.")?;
                }
                Ok(())
            }
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Ops(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::InvalidArguments(_) => None,
        }
    }
}

impl From<spout_errors::ConfigError> for CliError {
    fn from(e: spout_errors::ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<spout_errors::Error> for CliError {
    fn from(e: spout_errors::Error) -> Self {
        match e {
            spout_errors::Error::Config(config) => CliError::Config(config),
            other => CliError::Ops(other),
        }
    }
}

impl From<spout_errors::DistError> for CliError {
    fn from(e: spout_errors::DistError) -> Self {
        CliError::Ops(e.into())
    }
}

impl From<spout_errors::VersionError> for CliError {
    fn from(e: spout_errors::VersionError) -> Self {
        CliError::Ops(e.into())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spout_errors::NetworkError;

    #[test]
    fn test_checksum_mismatch_rendering() {
        let err = CliError::from(spout_errors::Error::from(NetworkError::ChecksumMismatch {
            expected: "aa".to_string(),
            actual: "bb".to_string(),
        }));
        let text = err.to_string();
        assert!(text.contains("corrupted during download"));
        assert!(text.contains("Code: network.checksum_mismatch"));
        assert!(text.contains("Retry: safe to retry"));
    }

    #[test]
    fn test_config_errors_unwrapped() {
        let err = CliError::from(spout_errors::Error::from(
            spout_errors::ConfigError::NotFound {
                path: "/nope.toml".to_string(),
            },
        ));
        assert!(matches!(err, CliError::Config(_)));
    }
}
