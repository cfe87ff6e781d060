//! URL, response and checksum validation for downloads

use super::config::ChecksumSource;
use reqwest::header::ETAG;
use spout_errors::{Error, NetworkError};
use spout_hash::Md5Digest;
use std::path::{Path, PathBuf};
use url::Url;

/// Validate URL and check for supported protocols
pub(super) fn validate_url(url: &str) -> Result<Url, Error> {
    let parsed = Url::parse(url).map_err(|e| NetworkError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(NetworkError::UnsupportedProtocol {
            protocol: scheme.to_string(),
        }
        .into()),
    }
}

/// Validate HTTP response for download
pub(super) fn validate_response(response: &reqwest::Response) -> Result<(), Error> {
    let status = response.status();

    if !status.is_success() {
        return Err(NetworkError::HttpError {
            status: status.as_u16(),
            message: status.to_string(),
        }
        .into());
    }

    Ok(())
}

/// Pick the checksum the downloaded bytes must hash to
///
/// The server's `ETag` wins when it holds a plain MD5 digest. Otherwise the
/// registry-declared digest is used.
pub(super) fn expected_checksum(
    response: &reqwest::Response,
    fallback: Option<&str>,
    url: &str,
) -> Result<(Md5Digest, ChecksumSource), Error> {
    let etag = response
        .headers()
        .get(ETAG)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Md5Digest::from_etag(v).ok());

    if let Some(digest) = etag {
        return Ok((digest, ChecksumSource::Etag));
    }

    match fallback {
        Some(hex) => Ok((Md5Digest::from_hex(hex.trim())?, ChecksumSource::Registry)),
        None => Err(NetworkError::MissingChecksum {
            url: url.to_string(),
        }
        .into()),
    }
}

/// Sibling temporary path: `<destination>.part`
pub(super) fn part_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_path() {
        assert_eq!(
            part_path(Path::new("/tmp/out/pkg-1.0.tar.gz")),
            PathBuf::from("/tmp/out/pkg-1.0.tar.gz.part")
        );
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://files.example/pkg.whl").is_ok());
        assert!(matches!(
            validate_url("ftp://files.example/pkg.whl"),
            Err(Error::Network(NetworkError::UnsupportedProtocol { .. }))
        ));
        assert!(matches!(
            validate_url("not a url"),
            Err(Error::Network(NetworkError::InvalidUrl(_)))
        ));
    }
}
