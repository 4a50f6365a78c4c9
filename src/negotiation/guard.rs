//! Media type guard.
//!
//! # Responsibilities
//! - Require the canonical Content-Type on requests that carry a body
//! - Reject parameterized media types
//! - Enforce the Accept header according to the configured policy
//!
//! # Design Decisions
//! - Pure predicates, no state retained between calls
//! - Method table is fixed, not derived from method semantics
//! - Absent header is treated the same as an empty one

use axum::http::header::{ACCEPT, CONTENT_TYPE};

use crate::negotiation::media_type::{self, WILDCARD};
use crate::negotiation::policy::AcceptHeaderPolicy;
use crate::negotiation::request::NegotiationRequest;

/// Methods whose requests must declare a Content-Type.
const CONTENT_TYPE_REQUIRED_METHODS: [&str; 4] = ["POST", "PATCH", "PUT", "DELETE"];

/// Validates request headers against the protocol media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaTypeGuard {
    content_type: String,
    accept_policy: AcceptHeaderPolicy,
}

impl MediaTypeGuard {
    /// Create a guard for the given canonical media type.
    pub fn new(content_type: impl Into<String>, accept_policy: AcceptHeaderPolicy) -> Self {
        Self {
            content_type: content_type.into(),
            accept_policy,
        }
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn accept_header_policy(&self) -> AcceptHeaderPolicy {
        self.accept_policy
    }

    /// True only for the canonical media type with no parameters.
    pub fn content_type_is_valid(&self, value: &str) -> bool {
        value.trim() == self.content_type
    }

    pub fn client_request_must_have_content_type_header<R>(&self, request: &R) -> bool
    where
        R: NegotiationRequest + ?Sized,
    {
        let method = request.method();
        CONTENT_TYPE_REQUIRED_METHODS
            .iter()
            .any(|m| m.eq_ignore_ascii_case(method))
    }

    /// Validates the Content-Type if the client sent one.
    pub fn validate_existing_content_type<R>(&self, request: &R) -> bool
    where
        R: NegotiationRequest + ?Sized,
    {
        match request.header(CONTENT_TYPE.as_str()) {
            Some(value) if !value.is_empty() => self.content_type_is_valid(&value),
            _ => true,
        }
    }

    /// False only when a body-carrying method lacks a valid Content-Type.
    pub fn has_correct_headers_for_data<R>(&self, request: &R) -> bool
    where
        R: NegotiationRequest + ?Sized,
    {
        if !self.client_request_must_have_content_type_header(request) {
            return true;
        }

        match request.header(CONTENT_TYPE.as_str()) {
            Some(value) if !value.is_empty() => self.content_type_is_valid(&value),
            _ => false,
        }
    }

    /// Checks that the Accept header names `*/*` or the unparameterized media type.
    pub fn has_correctly_set_accept_header<R>(&self, request: &R) -> bool
    where
        R: NegotiationRequest + ?Sized,
    {
        if self.accept_policy == AcceptHeaderPolicy::Ignore {
            return true;
        }

        let header = request.header(ACCEPT.as_str()).unwrap_or_default();
        if header.trim().is_empty() {
            return self.accept_policy != AcceptHeaderPolicy::Require;
        }

        let mut entries = media_type::entries(&header);
        let accepted = entries.any(|entry| {
            media_type::essence(entry) == WILDCARD
                || (!media_type::has_parameters(entry) && entry == self.content_type)
        });
        accepted
    }
}
