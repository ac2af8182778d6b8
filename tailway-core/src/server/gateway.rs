use crate::respond::{TailResponse, handle_tail_request};
use crate::server::runtime::RuntimeState;
use arc_swap::ArcSwap;
use async_trait::async_trait;
use http::{HeaderValue, Method, StatusCode};
use pingora::prelude::*;
use pingora_http::ResponseHeader;
use std::sync::Arc;
use std::time::Instant;

/// Pingora front for the tail endpoint. Every request is answered in
/// `request_filter`; nothing is ever proxied.
pub struct TailwayGateway {
    // Runtime state
    pub state: Arc<ArcSwap<RuntimeState>>,
}

/// What the access log needs to know about a request.
pub struct RequestCtx {
    pub method: Option<Method>,
    pub path: String,
    pub status: Option<StatusCode>,
    pub started: Instant,
}

impl RequestCtx {
    pub fn new() -> Self {
        Self {
            method: None,
            path: String::new(),
            status: None,
            started: Instant::now(),
        }
    }
}

impl Default for RequestCtx {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProxyHttp for TailwayGateway {
    type CTX = RequestCtx;

    fn new_ctx(&self) -> Self::CTX {
        RequestCtx::new()
    }

    async fn upstream_peer(
        &self,
        _session: &mut Session,
        _ctx: &mut Self::CTX,
    ) -> Result<Box<HttpPeer>> {
        Err(Error::new(Custom("tailway does not proxy requests")))
    }

    /// ACCEPT --> ROUTE --> TAIL (blocking pool) --> RESPOND
    async fn request_filter(&self, session: &mut Session, ctx: &mut Self::CTX) -> Result<bool> {
        let req = session.req_header();
        let method = req.method.clone();
        let path = req.uri.path().to_string();
        let query = req.uri.query().unwrap_or_default().to_string();

        ctx.started = Instant::now();
        ctx.method = Some(method.clone());
        ctx.path = path.clone();

        let state = self.state.load_full();

        if path != state.tail.route {
            let resp = TailResponse::error(StatusCode::NOT_FOUND, "not found");
            return respond(session, ctx, resp, method == Method::HEAD).await;
        }

        if !matches!(method, Method::GET | Method::HEAD | Method::POST) {
            let mut resp = TailResponse::error(StatusCode::METHOD_NOT_ALLOWED, "method not allowed");
            resp.headers
                .insert(http::header::ALLOW, HeaderValue::from_static("GET, HEAD, POST"));
            return respond(session, ctx, resp, false).await;
        }

        // File I/O stays off the proxy's async workers.
        let resp = match tokio::task::spawn_blocking(move || {
            handle_tail_request(&state.tailer, &state.tail, &query)
        })
        .await
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!(error = %e, "tail task failed");
                TailResponse::error(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        };

        respond(session, ctx, resp, method == Method::HEAD).await
    }

    async fn logging(&self, _session: &mut Session, e: Option<&Error>, ctx: &mut Self::CTX)
    where
        Self::CTX: Send + Sync,
    {
        let method = ctx.method.as_ref().map(Method::as_str).unwrap_or("-");
        let status = ctx.status.map(|s| s.as_u16()).unwrap_or(0);
        let elapsed_ms = ctx.started.elapsed().as_millis() as u64;

        match e {
            Some(err) => tracing::warn!(
                method,
                path = %ctx.path,
                status,
                elapsed_ms,
                error = %err,
                "request"
            ),
            None => tracing::info!(method, path = %ctx.path, status, elapsed_ms, "request"),
        }
    }
}

/// Write a complete response and end the stream.
async fn respond(
    session: &mut Session,
    ctx: &mut RequestCtx,
    resp: TailResponse,
    is_head: bool,
) -> Result<bool> {
    ctx.status = Some(resp.status);

    let mut header = ResponseHeader::build(resp.status, None)?;
    for (name, value) in resp.headers.iter() {
        header.insert_header(name.clone(), value.clone())?;
    }

    // Write headers (not end-of-stream yet)
    session.write_response_header(Box::new(header), false).await?;

    if is_head {
        session.write_response_body(None, true).await?;
    } else {
        session.write_response_body(Some(resp.body), true).await?;
    }

    Ok(true)
}
