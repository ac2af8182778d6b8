use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Record the current process id in `path`.
pub fn write_pid(path: &Path) -> Result<()> {
    fs::write(path, format!("{}\n", std::process::id()))
        .with_context(|| format!("failed to write pid file {}", path.display()))
}

/// Best-effort removal on shutdown.
pub fn remove_pid(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        tracing::warn!(error = %e, pid_file = %path.display(), "failed to remove pid file");
    }
}
