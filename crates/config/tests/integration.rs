//! Integration tests for config

#[cfg(test)]
mod tests {
    use spout_config::*;
    use spout_errors::{ConfigError, Error};
    use spout_types::{ColorChoice, DistType};
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to ensure env var tests don't run concurrently
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for var in [
            "SPOUT_COLOR",
            "SPOUT_REGISTRY_URL",
            "SPOUT_TIMEOUT",
            "SPOUT_RETRIES",
        ] {
            std::env::remove_var(var);
        }
    }

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[general]
color = "never"
default_dist = "sdist"

[network]
timeout = 10
retries = 0

[download]
chunk_size = 65536
keep_partial_on_mismatch = true

[registry]
base_url = "http://localhost:8080/pypi"
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.general.color, ColorChoice::Never);
        assert_eq!(config.general.default_dist, DistType::Sdist);
        assert_eq!(config.network.timeout, 10);
        assert_eq!(config.network.retries, 0);
        // untouched fields keep their defaults
        assert_eq!(config.network.connect_timeout, 30);
        assert_eq!(config.download.chunk_size, 65536);
        assert_eq!(config.download.poll_interval_ms, 100);
        assert!(config.download.keep_partial_on_mismatch);
        assert_eq!(config.registry.base_url, "http://localhost:8080/pypi");
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.download.chunk_size, 3 * 1024);
        assert_eq!(config.registry.base_url, "https://pypi.org/pypi");
        assert_eq!(config.general.default_dist, DistType::Wheel);
        assert!(!config.download.keep_partial_on_mismatch);
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[network\ntimeout = ").unwrap();
        let err = Config::load_from_file(temp_file.path()).await.unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseError { .. })));
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config.toml");
        let err = Config::load_from_file(&missing).await.unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_unreadable_path_keeps_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from_file(dir.path()).await.unwrap_err();
        match err {
            Error::Io { path, .. } => assert_eq!(path.as_deref(), Some(dir.path())),
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_zero_chunk_size_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[download]\nchunk_size = 0").unwrap();
        let err = Config::load_from_file(temp_file.path()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { ref field, .. }) if field == "download.chunk_size"
        ));
    }

    #[test]
    fn test_merge_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("SPOUT_COLOR", "always");
        std::env::set_var("SPOUT_REGISTRY_URL", "http://127.0.0.1:9000/pypi/");
        std::env::set_var("SPOUT_RETRIES", "5");

        let mut config = Config::default();
        config.merge_env().unwrap();

        assert_eq!(config.general.color, ColorChoice::Always);
        assert_eq!(config.registry.base_url, "http://127.0.0.1:9000/pypi");
        assert_eq!(config.network.retries, 5);

        clear_env();
    }

    #[test]
    fn test_merge_env_invalid_value() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("SPOUT_TIMEOUT", "soon");
        let mut config = Config::default();
        let err = config.merge_env().unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { ref field, ref value })
                if field == "SPOUT_TIMEOUT" && value == "soon"
        ));

        clear_env();
    }
}
