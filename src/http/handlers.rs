//! JSON:API handlers.

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::encoding::{EncoderError, ErrorObject};
use crate::http::server::AppState;

/// Type identifier of the gateway status resource.
pub const STATUS_TYPE: &str = "status";

#[derive(Serialize)]
struct GatewayStatus<'a> {
    id: &'static str,
    version: &'static str,
    media_type: &'a str,
    accept_policy: &'static str,
    encoders_built: usize,
}

/// `GET /status`: the gateway status encoded with the default encoder.
pub async fn get_status(State(state): State<AppState>) -> Response {
    let status = GatewayStatus {
        id: "gateway",
        version: env!("CARGO_PKG_VERSION"),
        media_type: state.guard.content_type(),
        accept_policy: state.guard.accept_header_policy().as_str(),
        encoders_built: state.encoders.cached_count(),
    };

    let encoded = state
        .encoders
        .default_encoder()
        .and_then(|encoder| encoder.encode_data(STATUS_TYPE, &status));
    match encoded {
        Ok(body) => document(&state, StatusCode::OK, body),
        Err(e) => encoding_failure(&state, e),
    }
}

/// Fallback for unmatched routes.
pub async fn not_found(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let error = ErrorObject {
        status: Some(StatusCode::NOT_FOUND.as_str().to_string()),
        title: Some("Not Found".to_string()),
        detail: Some(format!("No resource at {} {}", method, uri.path())),
        ..Default::default()
    };

    let encoded = state
        .encoders
        .default_encoder()
        .and_then(|encoder| encoder.encode_errors(&[error]));
    match encoded {
        Ok(body) => document(&state, StatusCode::NOT_FOUND, body),
        Err(e) => encoding_failure(&state, e),
    }
}

fn encoding_failure(state: &AppState, error: EncoderError) -> Response {
    tracing::error!(error = %error, "Failed to encode response document");
    let body = serde_json::json!({
        "errors": [{
            "status": StatusCode::INTERNAL_SERVER_ERROR.as_str(),
            "title": "Encoding failed",
        }]
    });
    document(state, StatusCode::INTERNAL_SERVER_ERROR, body.to_string())
}

fn document(state: &AppState, status: StatusCode, body: String) -> Response {
    let mut response = (status, body).into_response();
    if let Ok(value) = HeaderValue::from_str(state.guard.content_type()) {
        response.headers_mut().insert(header::CONTENT_TYPE, value);
    }
    response
}
