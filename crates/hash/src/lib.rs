#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! MD5 integrity checks for spout downloads
//!
//! The registry advertises file checksums as MD5 hex digests, either in the
//! `ETag` response header or in the file's metadata. This crate parses those
//! values and computes digests over streamed content.

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use spout_errors::{Error, NetworkError};
use std::fmt;

/// An MD5 digest value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Md5Digest {
    bytes: [u8; 16],
}

impl Md5Digest {
    /// Create a digest from raw bytes
    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self { bytes }
    }

    /// Convert to lowercase hex string
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Parse from hex string
    ///
    /// # Errors
    /// Returns an error if the input is not valid hexadecimal or is not exactly
    /// 32 characters (16 bytes).
    pub fn from_hex(s: &str) -> Result<Self, Error> {
        let malformed = |reason: String| NetworkError::MalformedChecksum {
            value: s.to_string(),
            reason,
        };
        let bytes = hex::decode(s).map_err(|e| malformed(format!("invalid hex: {e}")))?;

        let array: [u8; 16] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| malformed(format!("md5 must be 16 bytes, got {}", bytes.len())))?;
        Ok(Self::from_bytes(array))
    }

    /// Parse an `ETag` header value
    ///
    /// Surrounding whitespace, a weak validator prefix (`W/`) and the
    /// surrounding quotes are stripped before the hex is parsed.
    ///
    /// # Errors
    /// Returns an error if what remains is not a 32 character hex digest.
    pub fn from_etag(value: &str) -> Result<Self, Error> {
        let trimmed = value.trim();
        let unprefixed = trimmed
            .strip_prefix("W/")
            .or_else(|| trimmed.strip_prefix("w/"))
            .unwrap_or(trimmed);
        Self::from_hex(unprefixed.trim_matches('"'))
    }

    /// Compute digest of a byte slice
    #[must_use]
    pub fn from_data(data: &[u8]) -> Self {
        let mut hasher = Md5Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}

impl fmt::Display for Md5Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Md5Digest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Md5Digest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Incremental MD5 computation over chunks as they arrive
#[derive(Debug, Clone, Default)]
pub struct Md5Hasher {
    inner: Md5,
    bytes: u64,
}

impl Md5Hasher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk
    pub fn update(&mut self, chunk: &[u8]) {
        self.inner.update(chunk);
        self.bytes += chunk.len() as u64;
    }

    /// Bytes fed so far
    #[must_use]
    pub fn bytes_hashed(&self) -> u64 {
        self.bytes
    }

    #[must_use]
    pub fn finalize(self) -> Md5Digest {
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&self.inner.finalize());
        Md5Digest::from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_basics() {
        assert_eq!(
            Md5Digest::from_data(b"hello world").to_hex(),
            "5eb63bbbe01eeed093cb22bb8f5acdc3"
        );
        assert_eq!(
            Md5Digest::from_data(b"").to_hex(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
    }

    #[test]
    fn test_incremental_matches_one_shot() {
        let mut hasher = Md5Hasher::new();
        for chunk in b"hello world".chunks(3) {
            hasher.update(chunk);
        }
        assert_eq!(hasher.bytes_hashed(), 11);
        assert_eq!(hasher.finalize(), Md5Digest::from_data(b"hello world"));
    }

    #[test]
    fn test_etag_normalisation() {
        let expected = Md5Digest::from_data(b"hello world");
        for raw in [
            "\"5eb63bbbe01eeed093cb22bb8f5acdc3\"",
            "5eb63bbbe01eeed093cb22bb8f5acdc3",
            "W/\"5EB63BBBE01EEED093CB22BB8F5ACDC3\"",
            "  \"5eb63bbbe01eeed093cb22bb8f5acdc3\" ",
        ] {
            assert_eq!(Md5Digest::from_etag(raw).unwrap(), expected, "{raw}");
        }
    }

    #[test]
    fn test_multipart_etag_rejected() {
        let err = Md5Digest::from_etag("\"5eb63bbbe01eeed093cb22bb8f5acdc3-4\"").unwrap_err();
        assert!(matches!(
            err,
            Error::Network(NetworkError::MalformedChecksum { .. })
        ));
    }
}
