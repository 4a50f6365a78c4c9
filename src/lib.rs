//! JSON:API negotiation gateway library.
//!
//! Guards inbound requests on their `Content-Type` / `Accept` headers and hands
//! out configured JSON:API document encoders, one instance per name.

pub mod config;
pub mod encoding;
pub mod http;
pub mod lifecycle;
pub mod negotiation;
pub mod observability;

pub use config::schema::GatewayConfig;
pub use encoding::{Encoder, EncoderError, EncoderService};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use negotiation::{AcceptHeaderPolicy, MediaTypeGuard, NegotiationRequest, RequestFailedAuthorization};
