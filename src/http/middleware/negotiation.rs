//! Content negotiation middleware.
//! Rejects requests whose Content-Type or Accept header violates the media type guard.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::http::request::request_id;
use crate::negotiation::{MediaTypeGuard, RequestFailedAuthorization};
use crate::observability::metrics;

/// Evaluate the guard before the request reaches any handler.
pub async fn negotiation_middleware(
    State(guard): State<Arc<MediaTypeGuard>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();

    let response = match check(&guard, &request) {
        Ok(()) => next.run(request).await,
        Err(failure) => {
            tracing::warn!(
                request_id = %request_id(&request),
                method = %method,
                path = %request.uri().path(),
                reason = failure.reason(),
                "Request failed media type negotiation"
            );
            metrics::record_rejection(failure.reason());
            failure.into_response()
        }
    };

    metrics::record_request(method.as_str(), response.status().as_u16());
    response
}

/// Content-Type is checked before Accept.
pub fn check(guard: &MediaTypeGuard, request: &Request<Body>) -> Result<(), RequestFailedAuthorization> {
    if !guard.has_correct_headers_for_data(request) {
        return Err(RequestFailedAuthorization::UnsupportedContentType {
            expected: guard.content_type().to_string(),
        });
    }

    if !guard.has_correctly_set_accept_header(request) {
        return Err(RequestFailedAuthorization::NotAcceptable {
            expected: guard.content_type().to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::negotiation::{AcceptHeaderPolicy, JSON_API_MEDIA_TYPE};

    #[test]
    fn test_content_type_checked_first() {
        let guard = MediaTypeGuard::new(JSON_API_MEDIA_TYPE, AcceptHeaderPolicy::Require);
        let request = Request::builder()
            .method("POST")
            .body(Body::empty())
            .unwrap();

        let failure = check(&guard, &request).unwrap_err();
        assert_eq!(failure.reason(), "content_type");
    }

    #[test]
    fn test_accept_failure() {
        let guard = MediaTypeGuard::new(JSON_API_MEDIA_TYPE, AcceptHeaderPolicy::Require);
        let request = Request::builder()
            .method("POST")
            .header("Content-Type", JSON_API_MEDIA_TYPE)
            .body(Body::empty())
            .unwrap();

        let failure = check(&guard, &request).unwrap_err();
        assert_eq!(failure.reason(), "accept");

        let request = Request::builder()
            .method("GET")
            .header("Accept", JSON_API_MEDIA_TYPE)
            .body(Body::empty())
            .unwrap();
        assert!(check(&guard, &request).is_ok());
    }
}
