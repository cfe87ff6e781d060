//! Integration tests for index crate

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use spout_index::*;
    use spout_types::Version;

    const DOCUMENT: &str = r#"{
        "info": {
            "name": "otlet",
            "version": "1.0.0",
            "summary": "Query the package registry",
            "home_page": "",
            "license": "MIT",
            "requires_python": ">=3.8",
            "requires_dist": ["arrow>=1.0", "pytest ; extra == \"dev\""],
            "project_urls": {"Homepage": "https://github.com/example/otlet"},
            "yanked": false,
            "yanked_reason": null
        },
        "releases": {
            "0.9.0": [
                {"filename": "otlet-0.9.0.tar.gz", "url": "https://files.example/otlet-0.9.0.tar.gz",
                 "packagetype": "sdist", "size": 9000, "md5_digest": "00000000000000000000000000000000",
                 "upload_time_iso_8601": "2021-11-02T08:00:00.000000Z", "yanked": true, "yanked_reason": "bad metadata"}
            ],
            "0.10.0": [],
            "1.0.0rc1": [
                {"filename": "otlet-1.0.0rc1-py3-none-any.whl", "url": "https://files.example/otlet-1.0.0rc1-py3-none-any.whl",
                 "packagetype": "bdist_wheel", "size": 12000,
                 "upload_time_iso_8601": "2022-01-10T08:00:00.000000Z", "yanked": false}
            ],
            "1.0.0": [
                {"filename": "otlet-1.0.0-py3-none-any.whl", "url": "https://files.example/otlet-1.0.0-py3-none-any.whl",
                 "packagetype": "bdist_wheel", "size": 12500,
                 "upload_time_iso_8601": "2022-02-01T08:00:00.000000Z", "yanked": false},
                {"filename": "otlet-1.0.0.tar.gz", "url": "https://files.example/otlet-1.0.0.tar.gz",
                 "packagetype": "sdist", "size": 9500,
                 "upload_time_iso_8601": "2022-01-31T08:00:00.000000Z", "yanked": false}
            ]
        },
        "urls": [
            {"filename": "otlet-1.0.0-py3-none-any.whl", "url": "https://files.example/otlet-1.0.0-py3-none-any.whl",
             "packagetype": "bdist_wheel", "size": 12500,
             "upload_time_iso_8601": "2022-02-01T08:00:00.000000Z", "yanked": false},
            {"filename": "otlet-1.0.0.tar.gz", "url": "https://files.example/otlet-1.0.0.tar.gz",
             "packagetype": "sdist", "size": 9500,
             "upload_time_iso_8601": "2022-01-31T08:00:00.000000Z", "yanked": false}
        ]
    }"#;

    #[test]
    fn test_document_release_map_keeps_order() {
        let doc = PackageDocument::from_json(DOCUMENT).unwrap();
        let map = doc.release_map();
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["0.9.0", "0.10.0", "1.0.0rc1", "1.0.0"]);

        assert!(map["0.9.0"].yanked);
        assert_eq!(map["0.9.0"].yanked_reason.as_deref(), Some("bad metadata"));
        assert!(map["0.10.0"].upload_time.is_none());
        // earliest file wins
        assert_eq!(
            map["1.0.0"].upload_time.unwrap().date_naive().to_string(),
            "2022-01-31"
        );
        assert_eq!(doc.file_count(), 4);
    }

    #[test]
    fn test_info_helpers() {
        let doc = PackageDocument::from_json(DOCUMENT).unwrap();
        assert_eq!(doc.info.homepage(), Some("https://github.com/example/otlet"));
        assert_eq!(doc.info.dependencies(), vec!["arrow>=1.0"]);
        assert_eq!(doc.files_for("1.0.0").unwrap().len(), 2);
        assert_eq!(doc.files_for("0.9.0").unwrap().len(), 1);
        assert!(doc.files_for("9.9.9").is_none());
        assert_eq!(doc.info.documentation(), None);
    }

    #[test]
    fn test_extras_and_contact_fields() {
        let json = r#"{
            "info": {
                "name": "Flask_SQLAlchemy.Ext",
                "version": "3.1.0",
                "author_email": "dev@example.org",
                "maintainer": "",
                "provides_extra": ["async"],
                "requires_dist": [
                    "sqlalchemy>=2.0",
                    "pytest ; extra == 'test'",
                    "greenlet ; extra=="async"",
                    "coverage ; python_version >= "3.8" and extra == "test""
                ],
                "project_urls": {"documentation": "https://docs.example.org", "Source": ""}
            }
        }"#;
        let doc = PackageDocument::from_json(json).unwrap();
        let info = &doc.info;

        assert_eq!(info.extras(), vec!["async", "test"]);
        assert_eq!(info.dependencies(), vec!["sqlalchemy>=2.0"]);
        assert_eq!(info.canonical_name(), "flask-sqlalchemy-ext");
        assert_eq!(info.documentation(), Some("https://docs.example.org"));
        assert_eq!(info.author_email.as_deref(), Some("dev@example.org"));
    }

    #[test]
    fn test_release_document_without_releases() {
        let json = r#"{"info": {"name": "otlet", "version": "0.9.0"}, "urls": []}"#;
        let doc = PackageDocument::from_json(json).unwrap();
        assert!(doc.releases.is_empty());
        assert!(doc.current_release().upload_time.is_none());
    }

    #[test]
    fn test_invalid_document() {
        let err = PackageDocument::from_json("{\"info\": 3}").unwrap_err();
        assert!(matches!(
            err,
            spout_errors::Error::Registry(spout_errors::RegistryError::InvalidDocument { .. })
        ));
    }

    #[test]
    fn test_version_window_with_prerelease() {
        let map = PackageDocument::from_json(DOCUMENT).unwrap().release_map();
        let bounds = ReleaseBounds::parse(Some("0.10"), Some("1.0.0"), None, None).unwrap();
        let matched: Vec<_> = filter_releases(&map, &bounds)
            .into_iter()
            .map(|(v, _)| v)
            .collect();
        assert_eq!(matched, vec!["0.10.0", "1.0.0rc1", "1.0.0"]);
    }

    #[test]
    fn test_stable_selector() {
        assert!(is_stable_selector("stable"));
        assert!(is_stable_selector("STABLE"));
        assert!(!is_stable_selector("1.0"));
    }

    proptest! {
        #[test]
        fn unbounded_filter_returns_everything_in_order(
            versions in proptest::collection::vec((0u64..50, 0u64..50), 0..20)
        ) {
            let mut map = indexmap::IndexMap::new();
            for (major, minor) in versions {
                let key = format!("{major}.{minor}");
                map.insert(key.clone(), spout_types::ReleaseRecord::from_artifacts(&key, &[]));
            }
            let filtered: Vec<_> = filter_releases(&map, &ReleaseBounds::default())
                .into_iter()
                .map(|(v, _)| v.to_string())
                .collect();
            let expected: Vec<_> = map.keys().cloned().collect();
            prop_assert_eq!(filtered, expected);
        }

        #[test]
        fn equal_bounds_select_exact_version(
            target in 0u64..20,
            others in proptest::collection::vec(0u64..20, 1..10)
        ) {
            let mut map = indexmap::IndexMap::new();
            for n in others.iter().chain(std::iter::once(&target)) {
                let key = format!("1.{n}");
                map.insert(key.clone(), spout_types::ReleaseRecord::from_artifacts(&key, &[]));
            }
            let v = format!("1.{target}");
            let bounds = ReleaseBounds::parse(Some(&v), Some(&v), None, None).unwrap();
            let filtered = filter_releases(&map, &bounds);
            prop_assert_eq!(filtered.len(), 1);
            prop_assert_eq!(filtered[0].1.version.clone(), Some(Version::parse(&v).unwrap()));
        }
    }
}
