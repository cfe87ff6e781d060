//! Tracing setup and structured logging of events

use spout_config::Config;
use spout_events::{AppEvent, DownloadEvent, RegistryEvent, SelectionEvent};
use tracing::Level;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,spout=warn";
const DEBUG_FILTER: &str = "info,spout=debug";

/// Emit a tracing event at a level only known at runtime
macro_rules! log_at {
    ($level:expr, $target:literal, $($rest:tt)+) => {
        match $level {
            Level::ERROR => tracing::error!(target: $target, $($rest)+),
            Level::WARN => tracing::warn!(target: $target, $($rest)+),
            Level::INFO => tracing::info!(target: $target, $($rest)+),
            Level::DEBUG => tracing::debug!(target: $target, $($rest)+),
            _ => tracing::trace!(target: $target, $($rest)+),
        }
    };
}

/// Initialize tracing/logging
///
/// JSON mode keeps stdout clean; debug mode writes JSON records to a log file.
pub fn init_tracing(json_mode: bool, debug_enabled_flag: bool) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    if debug_enabled {
        let log_dir = Config::log_dir();
        if let Err(e) = std::fs::create_dir_all(&log_dir) {
            if !json_mode {
                eprintln!("Warning: Failed to create log directory: {e}");
            }
        }

        let log_file = log_dir.join(format!(
            "spout-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        match std::fs::File::create(&log_file) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(
                        EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| EnvFilter::new(DEBUG_FILTER)),
                    )
                    .init();

                if !json_mode {
                    eprintln!("Debug logging enabled: {}", log_file.display());
                }
                return;
            }
            Err(e) => {
                if !json_mode {
                    eprintln!("Warning: Failed to create log file: {e}");
                }
            }
        }
    }

    if json_mode {
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
            )
            .init();
    }
}

/// Log an `AppEvent` using the tracing infrastructure with structured fields
pub fn log_event_with_tracing(event: &AppEvent) {
    let level = event.log_level();

    match event {
        AppEvent::Download(download) => match download {
            DownloadEvent::Started {
                url,
                filename,
                dist_type,
                total_size,
            } => log_at!(
                level,
                "spout::events::download",
                url = %url,
                filename = %filename,
                dist_type = %dist_type,
                total_size,
                "Download started"
            ),
            DownloadEvent::Retrying {
                url,
                attempt,
                max_attempts,
                reason,
            } => log_at!(
                level,
                "spout::events::download",
                url = %url,
                attempt,
                max_attempts,
                reason = %reason,
                "Retrying request"
            ),
            DownloadEvent::HashMismatch {
                url,
                expected,
                actual,
                partial_kept,
            } => log_at!(
                level,
                "spout::events::download",
                url = %url,
                expected = %expected,
                actual = %actual,
                partial_kept,
                "Checksum mismatch"
            ),
            DownloadEvent::Completed {
                url,
                destination,
                bytes,
                md5,
            } => log_at!(
                level,
                "spout::events::download",
                url = %url,
                destination = %destination.display(),
                bytes,
                md5 = %md5,
                "Download completed"
            ),
            other => log_at!(level, "spout::events::download", event = ?other, "Download event"),
        },

        AppEvent::Registry(registry) => match registry {
            RegistryEvent::FetchStarted { package, url } => log_at!(
                level,
                "spout::events::registry",
                package = %package,
                url = %url,
                "Fetching package document"
            ),
            RegistryEvent::FetchCompleted {
                package,
                releases,
                files,
            } => log_at!(
                level,
                "spout::events::registry",
                package = %package,
                releases,
                files,
                "Fetched package document"
            ),
            other => log_at!(level, "spout::events::registry", event = ?other, "Registry event"),
        },

        AppEvent::Selection(selection) => match selection {
            SelectionEvent::CatalogBuilt {
                release,
                entries,
                wheels,
            } => log_at!(
                level,
                "spout::events::selection",
                release = %release,
                entries,
                wheels,
                "Catalog built"
            ),
            other => log_at!(level, "spout::events::selection", event = ?other, "Selection event"),
        },

        AppEvent::General(_) => log_at!(
            level,
            "spout::events::general",
            domain = event.log_target(),
            fields = %event.log_fields(),
            "General event"
        ),
    }
}
