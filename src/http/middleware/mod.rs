//! Request middleware.

pub mod negotiation;

pub use negotiation::negotiation_middleware;
