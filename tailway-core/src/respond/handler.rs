use crate::conf::types::TailConfig;
use crate::respond::{TailResponse, assemble};
use crate::tail::{TailError, TailRequest, Tailer};

/// Serve one tail request from its raw query string.
///
/// Performs blocking file I/O; async callers should run it on a blocking thread.
pub fn handle_tail_request(tailer: &Tailer, cfg: &TailConfig, query: &str) -> TailResponse {
    let request = match TailRequest::from_query(query) {
        Ok(r) => r,
        Err(e) => return error_response(&e),
    };

    match tailer.fetch(&request) {
        Ok(result) => assemble(&request, &result, cfg),
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &TailError) -> TailResponse {
    match err {
        TailError::Read { source, .. } => {
            tracing::error!(error = %err, cause = %source, "tail request failed");
        }
        _ => tracing::warn!(error = %err, "tail request rejected"),
    }

    TailResponse::error(err.status(), &err.to_string())
}
