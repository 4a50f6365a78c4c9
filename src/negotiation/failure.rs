//! Authorization failure raised when negotiation fails.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// A request that did not satisfy the media type guard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestFailedAuthorization {
    #[error("Content-Type must be '{expected}' without media type parameters")]
    UnsupportedContentType { expected: String },

    #[error("Accept header must include '{expected}' without media type parameters, or '*/*'")]
    NotAcceptable { expected: String },
}

impl RequestFailedAuthorization {
    pub fn http_status(&self) -> StatusCode {
        StatusCode::FORBIDDEN
    }

    /// Short label used in logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            RequestFailedAuthorization::UnsupportedContentType { .. } => "content_type",
            RequestFailedAuthorization::NotAcceptable { .. } => "accept",
        }
    }

    fn media_type(&self) -> &str {
        match self {
            RequestFailedAuthorization::UnsupportedContentType { expected }
            | RequestFailedAuthorization::NotAcceptable { expected } => expected,
        }
    }
}

impl IntoResponse for RequestFailedAuthorization {
    fn into_response(self) -> Response {
        let status = self.http_status();
        let document = json!({
            "errors": [{
                "status": status.as_str(),
                "title": "Request failed authorization",
                "detail": self.to_string(),
                "code": self.reason(),
            }]
        });

        let mut response = (status, document.to_string()).into_response();
        if let Ok(value) = HeaderValue::from_str(self.media_type()) {
            response.headers_mut().insert(header::CONTENT_TYPE, value);
        }
        response
    }
}
