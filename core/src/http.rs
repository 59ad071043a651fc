//! HTTP request and response values as plain data.
//!
//! # Design
//! The core never touches the network. It produces `HttpRequest` values and
//! consumes `HttpResponse` values; a caller-supplied
//! [`Requestor`](crate::Requestor) executes the round-trip in between. This
//! keeps the pipeline deterministic and easy to test.
//!
//! GET requests carry their named parameters in `data` (a query map) and
//! non-GET requests carry them as a JSON object in `body`; a
//! collection-typed argument always lands in `body` wholesale. The split is
//! decided by the argument binder, not the transport.

use std::borrow::Cow;
use std::collections::HashMap;

use serde_json::{Map, Value};

/// HTTP verb of a request. Methods default to `Get` when their registration
/// does not name one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

/// One fully bound request, produced per call and handed to the transport.
/// Never shared between calls and never mutated after binding.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Fully resolved URL with every `{name}` path token substituted.
    pub url: String,
    /// Named parameters of a GET request; the transport encodes them as the
    /// query string.
    pub data: Map<String, Value>,
    /// Request payload: a raw-body argument, or the named-parameter object
    /// of a non-GET request. Serialized by the transport.
    pub body: Option<Value>,
    pub headers: HashMap<String, String>,
    pub cookies: HashMap<String, String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            data: Map::new(),
            body: None,
            headers: HashMap::new(),
            cookies: HashMap::new(),
        }
    }
}

/// One raw response, produced by the transport and consumed exactly once by
/// the response mapper.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub content_type: String,
    pub charset: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// A 200 response carrying the given text body; the common case in
    /// tests and mock transports.
    pub fn ok(body: &str) -> Self {
        Self {
            status: 200,
            reason: "OK".to_string(),
            content_type: "application/json".to_string(),
            charset: "UTF-8".to_string(),
            body: body.as_bytes().to_vec(),
        }
    }

    /// The body decoded as text. Invalid UTF-8 is replaced rather than
    /// rejected; structural validation happens in the response mapper.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_defaults_to_get() {
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
    }

    #[test]
    fn method_displays_as_uppercase_token() {
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Get.to_string(), "GET");
    }

    #[test]
    fn new_request_is_empty_apart_from_target() {
        let req = HttpRequest::new(HttpMethod::Get, "http://localhost/city");
        assert_eq!(req.url, "http://localhost/city");
        assert!(req.data.is_empty());
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
        assert!(req.cookies.is_empty());
    }

    #[test]
    fn response_text_decodes_utf8_body() {
        let resp = HttpResponse::ok("{\"name\":\"东莞\"}");
        assert_eq!(resp.text(), "{\"name\":\"东莞\"}");
        assert_eq!(resp.status, 200);
        assert_eq!(resp.charset, "UTF-8");
    }
}
