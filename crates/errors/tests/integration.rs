//! Integration tests for error types

#[cfg(test)]
mod tests {
    use spout_errors::*;

    #[test]
    fn test_error_conversion() {
        let net_err = NetworkError::Timeout {
            url: "https://pypi.org/pypi/requests/json".into(),
        };
        let err: Error = net_err.into();
        assert!(matches!(err, Error::Network(_)));
    }

    #[test]
    fn test_malformed_pattern_echoes_input() {
        let err = DistError::MalformedPattern {
            pattern: "py3-none".into(),
            reason: "expected 4 segments, found 2".into(),
        };
        assert!(err.to_string().contains("'py3-none'"));
        assert_eq!(err.user_code(), Some("dist.malformed_pattern"));
    }

    #[test]
    fn test_checksum_mismatch_is_retryable() {
        let err: Error = NetworkError::ChecksumMismatch {
            expected: "abc".into(),
            actual: "def".into(),
        }
        .into();
        assert!(err.is_retryable());
        let message = err.user_message();
        assert!(message.contains("abc"));
        assert!(message.contains("def"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(
            err,
            Error::Io {
                kind: std::io::ErrorKind::PermissionDenied,
                ..
            }
        ));
        assert_eq!(err.user_code(), Some("error.io"));
    }

    #[test]
    fn test_error_clone() {
        let err = RegistryError::PackageNotFound {
            name: "nonexistent".into(),
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
