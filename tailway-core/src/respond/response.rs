use crate::conf::types::TailConfig;
use crate::respond::page::{PageContext, render_page};
use crate::tail::{TailRequest, TailResult};
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, StatusCode};
use serde::{Deserialize, Serialize};

pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

pub struct TailResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Body of a poll response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollPayload {
    pub log: String,
    pub pointer: u64,
}

impl TailResponse {
    pub fn new(status: StatusCode, content_type: &'static str, body: impl Into<Bytes>) -> Self {
        let body = body.into();

        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static(content_type),
        );
        // Every response reflects the file at request time.
        headers.insert(
            http::header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        );
        headers.insert(http::header::CONTENT_LENGTH, HeaderValue::from(body.len()));

        Self {
            status,
            headers,
            body,
        }
    }

    pub fn error(status: StatusCode, message: &str) -> Self {
        Self::new(status, CONTENT_TYPE_TEXT, format!("{message}\n"))
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}

/// Pick the response shape: viewer page on first load, JSON payload on polls.
pub fn assemble(request: &TailRequest, result: &TailResult, cfg: &TailConfig) -> TailResponse {
    if request.is_first_load() {
        let page = render_page(&PageContext {
            text: &result.text,
            path: &result.path,
            route: &cfg.route,
            refresh_interval_millis: cfg.refresh_interval_millis,
            pointer: result.next_offset,
            request,
        });

        return TailResponse::new(StatusCode::OK, CONTENT_TYPE_HTML, page);
    }

    let payload = PollPayload {
        log: result.text.clone(),
        pointer: result.next_offset,
    };

    match serde_json::to_vec(&payload) {
        Ok(body) => TailResponse::new(StatusCode::OK, CONTENT_TYPE_JSON, body),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize poll payload");
            TailResponse::error(StatusCode::INTERNAL_SERVER_ERROR, "failed to encode response")
        }
    }
}
