//! Local Python interpreter detection for release notices

use spout_types::Version;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

const CANDIDATES: [&str; 2] = ["python3", "python"];
const VERSION_TIMEOUT: Duration = Duration::from_secs(5);

/// Version of the first interpreter on `PATH` that reports one
///
/// Returns `None` when no interpreter answers; the compatibility notice is
/// then skipped.
pub async fn detect_python() -> Option<Version> {
    for program in CANDIDATES {
        let run = Command::new(program)
            .arg("--version")
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(VERSION_TIMEOUT, run).await {
            Ok(Ok(output)) if output.status.success() => output,
            Ok(Ok(output)) => {
                debug!("{program} --version exited with {}", output.status);
                continue;
            }
            Ok(Err(e)) => {
                debug!("{program} not runnable: {e}");
                continue;
            }
            Err(_) => {
                debug!("{program} --version timed out");
                continue;
            }
        };

        // Python 2 reports on stderr
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if let Some(version) = parse_version_line(&stdout).or_else(|| parse_version_line(&stderr)) {
            debug!("using {program} {version} for compatibility notices");
            return Some(version);
        }
    }
    None
}

/// Parse `Python 3.11.4` style output
fn parse_version_line(output: &str) -> Option<Version> {
    let line = output.lines().next()?.trim();
    let number = line.strip_prefix("Python ")?;
    Version::parse(number.trim()).ok()
}
