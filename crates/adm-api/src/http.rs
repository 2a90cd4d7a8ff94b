//! Transport-agnostic request and response types.
//!
//! The router only sees these; `server.rs` converts to and from `tiny_http`.

use serde::Serialize;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Other,
}

impl Method {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "GET" | "HEAD" => Self::Get,
            "POST" => Self::Post,
            "PATCH" => Self::Patch,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    /// Raw query string without the leading `?`.
    pub query: Option<String>,
    /// Raw `Cookie` header.
    pub cookie: Option<String>,
    pub body: Vec<u8>,
}

impl ApiRequest {
    /// Build a request from a method and a URL of the form `/path?query`.
    #[must_use]
    pub fn new(method: Method, url: &str) -> Self {
        let (path, query) = match url.split_once('?') {
            Some((p, q)) => (p, Some(q.to_string())),
            None => (url, None),
        };
        Self {
            method,
            path: path.to_string(),
            query,
            cookie: None,
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn get(url: &str) -> Self {
        Self::new(Method::Get, url)
    }

    #[must_use]
    pub fn post(url: &str) -> Self {
        Self::new(Method::Post, url)
    }

    #[must_use]
    pub fn patch(url: &str) -> Self {
        Self::new(Method::Patch, url)
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    #[must_use]
    pub fn with_json(self, value: &serde_json::Value) -> Self {
        self.with_body(value.to_string())
    }

    #[must_use]
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    /// Decoded value of query parameter `name`.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query.as_deref().and_then(|q| find_pair(q, name))
    }

    /// Decoded value of field `name` in an `application/x-www-form-urlencoded` body.
    #[must_use]
    pub fn form_field(&self, name: &str) -> Option<String> {
        std::str::from_utf8(&self.body)
            .ok()
            .and_then(|body| find_pair(body, name))
    }
}

/// Look up `name` in `a=1&b=2` and percent-decode its value (`+` is a space).
fn find_pair(encoded: &str, name: &str) -> Option<String> {
    encoded.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (decode_component(key) == name).then(|| decode_component(value))
    })
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).map_or(spaced.clone(), std::borrow::Cow::into_owned)
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// JSON response. Serialization of our own types cannot fail; if it
    /// somehow does, the caller gets a 500 with the serializer's message.
    pub fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self {
                status,
                headers: vec![("Content-Type".into(), "application/json".into())],
                body,
            },
            Err(e) => Self::error(&ApiError::Server(e.to_string())),
        }
    }

    #[must_use]
    pub fn html(status: u16, body: String) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".into(), "text/html; charset=utf-8".into())],
            body: body.into_bytes(),
        }
    }

    #[must_use]
    pub fn redirect(status: u16, location: &str) -> Self {
        Self {
            status,
            headers: vec![("Location".into(), location.to_string())],
            body: Vec::new(),
        }
    }

    /// `{ "error": message }` with the error's status code.
    #[must_use]
    pub fn error(error: &ApiError) -> Self {
        let status = error.status();
        tracing::warn!(status, %error, "request rejected");
        let body = serde_json::json!({ "error": error.to_string() });
        Self {
            status,
            headers: vec![("Content-Type".into(), "application/json".into())],
            body: body.to_string().into_bytes(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// First header named `name` (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Parse the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the body is not JSON.
    pub fn json_body(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
