//! Built-in defaults for spout

pub const APP_DIR: &str = "spout";
pub const CONFIG_FILE: &str = "config.toml";

pub const DEFAULT_REGISTRY_URL: &str = "https://pypi.org/pypi";

pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;

pub const DEFAULT_CHUNK_SIZE: usize = 3 * 1024;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;
