//! Shared utilities for integration tests.

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;

use jsonapi_gateway::NegotiationRequest;

/// A hand-built request exposing only a method and a few headers.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct FakeRequest {
    method: String,
    headers: HashMap<String, String>,
}

#[allow(dead_code)]
impl FakeRequest {
    pub fn new(method: &str) -> Self {
        Self {
            method: method.to_string(),
            headers: HashMap::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.to_string());
        self
    }
}

impl NegotiationRequest for FakeRequest {
    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|v| Cow::Borrowed(v.as_str()))
    }

    fn method(&self) -> &str {
        &self.method
    }
}

/// Build an HTTP request with the given headers and an empty body.
#[allow(dead_code)]
pub fn http_request(method: &str, uri: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::empty()).unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
