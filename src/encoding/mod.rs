//! Document encoding subsystem.
//!
//! # Data Flow
//! ```text
//! EncoderServiceConfig (schemas + named encoder configs)
//!     → service.rs (lazy, per-name singleton registry)
//!     → options.rs (normalize flags / urlPrefix / depth)
//!     → encoder.rs (domain data → JSON:API document)
//! ```
//!
//! # Design Decisions
//! - One encoder instance per name for the lifetime of the service
//! - Encoders are immutable and shared via Arc
//! - Schemas are shared by every encoder, never copied per encoder

pub mod encoder;
pub mod error;
pub mod options;
pub mod service;

pub use encoder::{Encoder, ErrorObject};
pub use error::EncoderError;
pub use options::EncoderOptions;
pub use service::{EncoderService, DEFAULT_ENCODER};
