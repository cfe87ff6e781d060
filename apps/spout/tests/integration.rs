//! Integration tests for spout CLI

use httpmock::prelude::*;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const SDIST_BODY: &str = "test";
const SDIST_MD5: &str = "098f6bcd4621d373cade4e832627b4f6";

fn write_config(dir: &Path, base_url: &str) -> PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(
        &path,
        format!("[registry]\nbase_url = \"{base_url}\"\n\n[network]\nretries = 0\n"),
    )
    .expect("Failed to write config");
    path
}

fn spout(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_spout"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("SPOUT_REGISTRY_URL")
        .env_remove("SPOUT_COLOR")
        .output()
        .expect("Failed to execute spout")
}

fn package_json(server: &MockServer) -> String {
    let file = |name: &str, kind: &str, size: u64| {
        format!(
            r#"{{"filename": "{name}", "url": "{url}", "packagetype": "{kind}",
                "size": {size}, "md5_digest": "{SDIST_MD5}",
                "upload_time_iso_8601": "2021-06-15T09:00:00Z"}}"#,
            url = server.url(format!("/files/{name}"))
        )
    };
    let py3 = file("pkg-1.0-py3-none-any.whl", "bdist_wheel", 2_000_000);
    let cp27 = file("pkg-1.0-cp27-cp27m-win32.whl", "bdist_wheel", 1_500_000);
    let sdist = file("pkg-1.0.tar.gz", "sdist", 4);
    format!(
        r#"{{
            "info": {{
                "name": "pkg", "version": "1.0", "summary": "A package",
                "requires_python": ">=3.8",
                "requires_dist": ["requests", "pytest ; extra == \"test\""],
                "project_urls": {{"Documentation": "https://docs.pkg.example"}}
            }},
            "releases": {{"1.0": [{py3}, {cp27}, {sdist}]}},
            "urls": [{py3}, {cp27}, {sdist}]
        }}"#
    )
}

fn serve_package(server: &MockServer) {
    let body = package_json(server);
    server.mock(move |when, then| {
        when.method(GET).path("/pypi/pkg/json");
        then.status(200).body(body.clone());
    });
}

#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_spout"))
        .arg("--version")
        .output()
        .expect("Failed to execute spout");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("spout"));
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_spout"))
        .arg("--help")
        .output()
        .expect("Failed to execute spout");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("info"));
    assert!(stdout.contains("releases"));
    assert!(stdout.contains("download"));
}

#[test]
fn test_cli_invalid_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_spout"))
        .arg("invalid-command")
        .output()
        .expect("Failed to execute spout");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn test_malformed_pattern_fails_before_any_request() {
    let server = MockServer::start();
    let document = server.mock(|when, then| {
        when.method(GET);
        then.status(200);
    });
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &server.url("/pypi"));

    let output = spout(&config, &["download", "pkg", "-f", "py3-none"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("py3-none"), "stderr: {stderr}");
    document.assert_hits(0);
}

#[test]
fn test_invalid_date_bound() {
    let server = MockServer::start();
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &server.url("/pypi"));

    let output = spout(&config, &["releases", "pkg", "--before-date", "2021-13-40"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("2021-13-40"), "stderr: {stderr}");
}

#[test]
fn test_json_info() {
    let server = MockServer::start();
    serve_package(&server);
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &server.url("/pypi"));

    let output = spout(&config, &["--json", "info", "pkg"]);

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["type"], "PackageInfo");
    assert_eq!(json["data"]["name"], "pkg");
    assert_eq!(json["data"]["version"], "1.0");
}

#[test]
fn test_json_download_sdist_into_directory() {
    let server = MockServer::start();
    serve_package(&server);
    server.mock(|when, then| {
        when.method(GET).path("/files/pkg-1.0.tar.gz");
        then.status(200)
            .header("ETag", format!("\"{SDIST_MD5}\""))
            .body(SDIST_BODY);
    });
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &server.url("/pypi"));
    let out_dir = dir.path().join("out");
    std::fs::create_dir(&out_dir).unwrap();

    let output = spout(
        &config,
        &[
            "--json",
            "download",
            "pkg",
            "-d",
            "sdist",
            "-o",
            out_dir.to_str().unwrap(),
        ],
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["type"], "Download");
    assert_eq!(json["data"]["md5"], SDIST_MD5);
    assert_eq!(
        std::fs::read_to_string(out_dir.join("pkg-1.0.tar.gz")).unwrap(),
        SDIST_BODY
    );
}

#[test]
fn test_json_download_refuses_ambiguous_choice() {
    let server = MockServer::start();
    serve_package(&server);
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &server.url("/pypi"));

    let output = spout(&config, &["--json", "download", "pkg", "-d", "bdist_wheel"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("a choice is required"), "stderr: {stderr}");
}

#[test]
fn test_json_list_distributions() {
    let server = MockServer::start();
    serve_package(&server);
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &server.url("/pypi"));

    let output = spout(&config, &["--json", "download", "pkg", "--list", "-f", "*-py3-*-*"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["type"], "Distributions");
    let entries = json["data"]["entries"].as_array().unwrap();
    // The sdist is exempt from tag filtering
    let names: Vec<&str> = entries
        .iter()
        .map(|entry| entry["filename"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["pkg-1.0-py3-none-any.whl", "pkg-1.0.tar.gz"]);
}

#[test]
fn test_info_urls() {
    let server = MockServer::start();
    serve_package(&server);
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &server.url("/pypi"));

    let output = spout(&config, &["--color", "never", "info", "pkg", "--urls"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "Documentation: https://docs.pkg.example");
}

#[test]
fn test_info_list_extras() {
    let server = MockServer::start();
    serve_package(&server);
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &server.url("/pypi"));

    let output = spout(&config, &["info", "pkg", "-e"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Allowable extras for 'pkg 1.0' are:"));
    assert!(stdout.contains("- pkg[test]"));
}

#[test]
fn test_json_notices_with_explicit_python() {
    let server = MockServer::start();
    serve_package(&server);
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &server.url("/pypi"));

    let output = spout(&config, &["--json", "info", "pkg", "-n", "--python", "3.7.9"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["type"], "Notices");
    assert_eq!(json["data"]["python"], "3.7.9");
    let notices = json["data"]["notices"].as_array().unwrap();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0]["kind"], "incompatible_python");
    assert_eq!(notices[0]["requires"], ">=3.8");
}

#[test]
fn test_invalid_python_version_fails_before_any_request() {
    let server = MockServer::start();
    let document = server.mock(|when, then| {
        when.method(GET);
        then.status(200);
    });
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &server.url("/pypi"));

    let output = spout(&config, &["info", "pkg", "-n", "--python", "three"]);

    assert_eq!(output.status.code(), Some(1));
    document.assert_hits(0);
}
