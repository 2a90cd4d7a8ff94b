//! `tiny_http` listener.
//!
//! `tiny_http::Server::recv` blocks, so the accept loop runs on a blocking
//! thread and drives each request to completion with `Handle::block_on`
//! before accepting the next one.

use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;

use tiny_http::{Header, Response};

use crate::app::ReviewApp;
use crate::error::ApiError;
use crate::http::{ApiRequest, ApiResponse, Method};

/// Request bodies larger than this are refused with 413.
const MAX_BODY_BYTES: u64 = 1024 * 1024;

pub struct Server {
    http: Arc<tiny_http::Server>,
    app: Arc<ReviewApp>,
}

impl Server {
    /// Bind the listener. Use port `0` to pick a free port.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Server` if the address cannot be bound.
    pub fn bind(addr: &str, app: ReviewApp) -> Result<Self, ApiError> {
        let http = tiny_http::Server::http(addr)
            .map_err(|e| ApiError::Server(format!("failed to bind {addr}: {e}")))?;
        Ok(Self {
            http: Arc::new(http),
            app: Arc::new(app),
        })
    }

    /// The bound address (useful after binding port `0`).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Server` if the listener is not on an IP socket.
    pub fn local_addr(&self) -> Result<SocketAddr, ApiError> {
        self.http
            .server_addr()
            .to_ip()
            .ok_or_else(|| ApiError::Server("listener has no IP address".into()))
    }

    /// A handle that can stop the accept loop from another thread.
    #[must_use]
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle(Arc::clone(&self.http))
    }

    /// Serve until [`ShutdownHandle::shutdown`] is called.
    ///
    /// Blocks the calling thread. Must not be called from inside an async
    /// task; use [`Self::run`] from async code.
    pub fn run_blocking(&self, runtime: &tokio::runtime::Handle) {
        tracing::info!(addr = ?self.http.server_addr(), "review server listening");
        for mut request in self.http.incoming_requests() {
            let response = match convert_request(&mut request) {
                Ok(api_request) => runtime.block_on(self.app.handle(api_request)),
                Err(e) => ApiResponse::error(&e),
            };
            if let Err(e) = request.respond(convert_response(response)) {
                tracing::warn!(error = %e, "failed to write response");
            }
        }
        tracing::info!("review server stopped");
    }

    /// Serve on a blocking thread of the current runtime.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Server` if the serving thread panicked.
    pub async fn run(self) -> Result<(), ApiError> {
        let runtime = tokio::runtime::Handle::current();
        tokio::task::spawn_blocking(move || self.run_blocking(&runtime))
            .await
            .map_err(|e| ApiError::Server(format!("server thread failed: {e}")))
    }
}

#[derive(Clone)]
pub struct ShutdownHandle(Arc<tiny_http::Server>);

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.0.unblock();
    }
}

fn convert_request(request: &mut tiny_http::Request) -> Result<ApiRequest, ApiError> {
    let mut api = ApiRequest::new(
        Method::parse(&request.method().to_string()),
        request.url(),
    );
    api.cookie = request
        .headers()
        .iter()
        .find(|h| h.field.equiv("Cookie"))
        .map(|h| h.value.as_str().to_string());

    api.body = read_body(request.as_reader(), MAX_BODY_BYTES)?;
    Ok(api)
}

/// Read at most `limit` bytes; one byte more means the body is too large.
fn read_body(reader: impl Read, limit: u64) -> Result<Vec<u8>, ApiError> {
    let mut body = Vec::new();
    if let Err(e) = reader.take(limit + 1).read_to_end(&mut body) {
        tracing::warn!(error = %e, "failed to read request body");
    }
    if body.len() as u64 > limit {
        return Err(ApiError::PayloadTooLarge { limit });
    }
    Ok(body)
}

fn convert_response(response: ApiResponse) -> Response<std::io::Cursor<Vec<u8>>> {
    let mut out = Response::from_data(response.body).with_status_code(response.status);
    for (name, value) in &response.headers {
        match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            Ok(header) => out.add_header(header),
            Err(()) => tracing::warn!(header = %name, "dropping invalid response header"),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn body_at_limit_is_kept_whole() {
        let body = read_body(Cursor::new(vec![b'x'; 16]), 16).unwrap();
        assert_eq!(body.len(), 16);
    }

    #[test]
    fn body_over_limit_is_refused() {
        let err = read_body(Cursor::new(vec![b'x'; 17]), 16).unwrap_err();
        assert!(matches!(err, ApiError::PayloadTooLarge { limit: 16 }));
        assert_eq!(ApiResponse::error(&err).status, 413);
    }
}
