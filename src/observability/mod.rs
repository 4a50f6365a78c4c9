//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured fields on every negotiation decision
//! - Request ID (x-request-id) attached to rejection events
//! - Metrics are cheap (no-ops until a recorder is installed)

pub mod logging;
pub mod metrics;
