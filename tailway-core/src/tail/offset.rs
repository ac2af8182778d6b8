/// Where a fetch starts reading, and whether a rollover forced it there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedStart {
    pub start: u64,
    pub rolled_over: bool,
}

/// Decide the byte offset to seek to for this call.
///
/// - No offset (first load): the last `window` bytes of the file.
/// - Offset within the file: resume exactly there.
/// - Offset past the end: the file was truncated or rotated. The tail window is
///   used again and the result is flagged as a rollover. This is not an error.
pub fn resolve_start(requested: Option<u64>, file_len: u64, window: u64) -> ResolvedStart {
    let tail = file_len.saturating_sub(window);

    match requested {
        None => ResolvedStart {
            start: tail,
            rolled_over: false,
        },
        Some(offset) if file_len < offset => ResolvedStart {
            start: tail,
            rolled_over: true,
        },
        Some(offset) => ResolvedStart {
            start: offset,
            rolled_over: false,
        },
    }
}
