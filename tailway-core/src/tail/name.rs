use std::path::{Component, Path, PathBuf};

/// Log used when the client does not name one.
pub const DEFAULT_LOG_NAME: &str = "error";

pub const LOG_SUFFIX: &str = ".log";

#[derive(Debug, PartialEq, Eq)]
pub enum ResolveError {
    NotFound,
    Forbidden,
    BadName,
}

/// Turn a client-supplied log name into a file name.
///
/// Empty or missing names fall back to [`DEFAULT_LOG_NAME`], and [`LOG_SUFFIX`] is
/// appended unless already present.
pub fn normalize_log_name(raw: Option<&str>) -> String {
    let name = raw.filter(|n| !n.is_empty()).unwrap_or(DEFAULT_LOG_NAME);

    if name.ends_with(LOG_SUFFIX) {
        name.to_string()
    } else {
        format!("{name}{LOG_SUFFIX}")
    }
}

/// Resolve a normalized log name to a regular file inside `log_dir`.
///
/// Names may point into subdirectories, but never outside the log directory,
/// neither lexically (`..`, absolute paths) nor through symlinks.
pub fn resolve_log_path(log_dir: &Path, name: &str) -> Result<PathBuf, ResolveError> {
    if name.is_empty() || name.contains('\0') {
        return Err(ResolveError::BadName);
    }

    let relative_path = Path::new(name);

    // Path component validation (no traversal, no absolute paths)
    for component in relative_path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => return Err(ResolveError::Forbidden),
        }
    }

    let base_canon = log_dir
        .canonicalize()
        .map_err(|_| ResolveError::NotFound)?;

    let target_canon = log_dir
        .join(relative_path)
        .canonicalize()
        .map_err(|_| ResolveError::NotFound)?;

    // Enforce containment
    if !target_canon.starts_with(&base_canon) {
        return Err(ResolveError::Forbidden);
    }

    if !target_canon.is_file() {
        return Err(ResolveError::NotFound);
    }

    Ok(target_canon)
}
