use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fully parsed `tailway.hcl`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuntimeConfig {
    pub server: ServerConfig,
    pub listener: ListenerConfig,
    #[serde(default)]
    pub tail: TailConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Configuration schema version
    pub version: u32,

    /// Optional number of worker threads - default is decided by Pingora.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,

    /// Optional pid file path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenerConfig {
    /// e.g. "0.0.0.0:8080"
    pub addr: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    pub cert: String,
    pub key: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TailConfig {
    /// Endpoint serving both the viewer page and poll responses.
    #[serde(default = "default_route")]
    pub route: String,

    /// Directory log names are resolved against. Relative paths are resolved
    /// against the config directory.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Tail window read on first load.
    #[serde(default = "default_bytes_to_read")]
    pub bytes_to_read: u64,

    /// Poll interval of the viewer page. Only echoed to the client.
    #[serde(default = "default_refresh_interval_millis")]
    pub refresh_interval_millis: u64,

    /// Soft cap on bytes consumed by a single fetch.
    #[serde(default = "default_max_read_bytes")]
    pub max_read_bytes: u64,

    /// Escape markup in lines that are not highlighted.
    #[serde(default = "default_escape_markup")]
    pub escape_markup: bool,
}

impl Default for TailConfig {
    fn default() -> Self {
        Self {
            route: default_route(),
            log_dir: default_log_dir(),
            bytes_to_read: default_bytes_to_read(),
            refresh_interval_millis: default_refresh_interval_millis(),
            max_read_bytes: default_max_read_bytes(),
            escape_markup: default_escape_markup(),
        }
    }
}

pub const DEFAULT_ROUTE: &str = "/bin/tail/log";
pub const HOME_ENV: &str = "TAILWAY_HOME";

fn default_route() -> String {
    DEFAULT_ROUTE.to_string()
}

/// `$TAILWAY_HOME/logs`, or `logs` under the working directory.
pub fn default_log_dir() -> PathBuf {
    std::env::var_os(HOME_ENV)
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_default()
        .join("logs")
}

fn default_bytes_to_read() -> u64 {
    2048
}

fn default_refresh_interval_millis() -> u64 {
    5000
}

fn default_max_read_bytes() -> u64 {
    1024 * 1024 // 1 MiB
}

fn default_escape_markup() -> bool {
    true
}
