use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable that switches diagnostics to tokio-console.
pub const TOKIO_CONSOLE_ENV: &str = "TOKIO_CONSOLE";

/// Initialize the logging system with JSON formatting and environment-based filtering
///
/// - `RUST_LOG` controls the filter (defaults to "info" if not set)
/// - events are written as flattened JSON objects, one per line
pub fn init_normal_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .json()
        .flatten_event(true)
        .init();
}

/// Human-oriented output on stderr for one-shot CLI commands, keeping stdout
/// free for their results.
pub fn init_cli_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

pub fn init_logging() {
    // If tokio-console is enabled, DO NOT install the normal subscriber
    if std::env::var(TOKIO_CONSOLE_ENV).is_ok() {
        console_subscriber::init();
    } else {
        init_normal_logging();
    }
}
