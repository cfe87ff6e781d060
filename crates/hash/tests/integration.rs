//! Integration tests for hash crate

#[cfg(test)]
mod tests {
    use spout_hash::*;

    #[test]
    fn test_etag_and_registry_digest_agree() {
        let from_registry = Md5Digest::from_hex("098f6bcd4621d373cade4e832627b4f6").unwrap();
        let from_header = Md5Digest::from_etag("\"098F6BCD4621D373CADE4E832627B4F6\"").unwrap();
        assert_eq!(from_registry, from_header);
        assert_eq!(from_header, Md5Digest::from_data(b"test"));
    }

    #[test]
    fn test_digest_from_hex_errors() {
        // Too short
        assert!(Md5Digest::from_hex("1234").is_err());
        // Not hex
        assert!(Md5Digest::from_hex("zz63bbbe01eeed093cb22bb8f5acdc3z").is_err());
    }

    #[test]
    fn test_digest_serialization() {
        let digest = Md5Digest::from_data(b"test");
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(json, "\"098f6bcd4621d373cade4e832627b4f6\"");
        let back: Md5Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, digest);
    }
}
