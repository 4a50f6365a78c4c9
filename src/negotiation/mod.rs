//! Content negotiation subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → request.rs (read-only view: header by name, method)
//!     → guard.rs (Content-Type / Accept predicates)
//!     → failure.rs (403 JSON:API error when a predicate fails)
//!     → Pass to handlers
//! ```
//!
//! # Design Decisions
//! - Guard is immutable after construction and shared via Arc
//! - Fail closed: malformed header values never match
//! - Parameterized media types are rejected for the canonical type

pub mod failure;
pub mod guard;
pub mod media_type;
pub mod policy;
pub mod request;

pub use failure::RequestFailedAuthorization;
pub use guard::MediaTypeGuard;
pub use policy::AcceptHeaderPolicy;
pub use request::NegotiationRequest;

/// Media type mandated by the JSON:API protocol.
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";
