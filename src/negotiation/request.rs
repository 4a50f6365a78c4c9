//! Read-only request view consumed by the guard.

use axum::http::Request;
use std::borrow::Cow;

/// Minimal request capabilities needed for content negotiation.
pub trait NegotiationRequest {
    /// Value of the named header, or `None` when the header is absent.
    fn header(&self, name: &str) -> Option<Cow<'_, str>>;

    /// HTTP method name (e.g. "GET").
    fn method(&self) -> &str;
}

impl<B> NegotiationRequest for Request<B> {
    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        let mut values = self.headers().get_all(name).iter();
        let first = values.next()?;

        // Non UTF-8 bytes are replaced so the value can never match the canonical type.
        let mut combined = String::from_utf8_lossy(first.as_bytes());
        for value in values {
            let owned = combined.to_mut();
            owned.push_str(", ");
            owned.push_str(&String::from_utf8_lossy(value.as_bytes()));
        }
        Some(combined)
    }

    fn method(&self) -> &str {
        Request::method(self).as_str()
    }
}

impl<R: NegotiationRequest + ?Sized> NegotiationRequest for &R {
    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        (**self).header(name)
    }

    fn method(&self) -> &str {
        (**self).method()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_single_header() {
        let req = Request::builder()
            .method("PATCH")
            .header("Content-Type", "application/vnd.api+json")
            .body(Body::empty())
            .unwrap();

        assert_eq!(req.header("content-type").as_deref(), Some("application/vnd.api+json"));
        assert_eq!(NegotiationRequest::method(&req), "PATCH");
        assert!(req.header("Accept").is_none());
    }

    #[test]
    fn test_repeated_header_lines_are_joined() {
        let req = Request::builder()
            .header("Accept", "application/json")
            .header("Accept", "application/vnd.api+json")
            .body(Body::empty())
            .unwrap();

        assert_eq!(
            req.header("Accept").as_deref(),
            Some("application/json, application/vnd.api+json")
        );
    }
}
