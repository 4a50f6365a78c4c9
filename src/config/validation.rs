//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Canonical media type must be a concrete `type/subtype` without parameters
//! - Encoder options must be usable (depth > 0, non-empty URL prefix)
//! - Addresses must parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::{EncoderConfig, GatewayConfig};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("media type '{value}' is not a valid type/subtype")]
    InvalidMediaType { value: String },

    #[error("media type '{value}' must not carry parameters")]
    ParameterizedMediaType { value: String },

    #[error("media type '{value}' must not be a wildcard range")]
    WildcardMediaType { value: String },

    #[error("encoder '{encoder}' has depth 0; depth must be at least 1")]
    ZeroDepth { encoder: String },

    #[error("encoder '{encoder}' has an empty urlPrefix")]
    EmptyUrlPrefix { encoder: String },

    #[error("schema '{type_id}' has an empty {field}")]
    EmptySchemaField { type_id: String, field: &'static str },

    #[error("invalid {field} address '{value}'")]
    InvalidAddress { field: &'static str, value: String },
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    validate_media_type(&config.negotiation.media_type, &mut errors);

    validate_encoder("", &config.encoding.default, &mut errors);
    let mut names: Vec<_> = config.encoding.encoders.keys().collect();
    names.sort();
    for name in names {
        validate_encoder(name, &config.encoding.encoders[name], &mut errors);
    }

    let mut type_ids: Vec<_> = config.encoding.schemas.keys().collect();
    type_ids.sort();
    for type_id in type_ids {
        let schema = &config.encoding.schemas[type_id];
        if schema.resource_type.trim().is_empty() {
            errors.push(ValidationError::EmptySchemaField {
                type_id: type_id.clone(),
                field: "resource_type",
            });
        }
        if schema.id_field.trim().is_empty() {
            errors.push(ValidationError::EmptySchemaField {
                type_id: type_id.clone(),
                field: "id_field",
            });
        }
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "metrics",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_media_type(value: &str, errors: &mut Vec<ValidationError>) {
    if value != value.trim() {
        errors.push(ValidationError::InvalidMediaType {
            value: value.to_string(),
        });
        return;
    }

    match value.parse::<mime::Mime>() {
        Ok(parsed) => {
            if parsed.params().next().is_some() || value.contains(';') {
                errors.push(ValidationError::ParameterizedMediaType {
                    value: value.to_string(),
                });
            } else if parsed.type_() == mime::STAR || parsed.subtype() == mime::STAR {
                errors.push(ValidationError::WildcardMediaType {
                    value: value.to_string(),
                });
            }
        }
        Err(_) => errors.push(ValidationError::InvalidMediaType {
            value: value.to_string(),
        }),
    }
}

fn validate_encoder(name: &str, config: &EncoderConfig, errors: &mut Vec<ValidationError>) {
    let options = &config.encoder_options;
    if options.depth == Some(0) {
        errors.push(ValidationError::ZeroDepth {
            encoder: name.to_string(),
        });
    }
    if matches!(options.url_prefix.as_deref(), Some(prefix) if prefix.trim().is_empty()) {
        errors.push(ValidationError::EmptyUrlPrefix {
            encoder: name.to_string(),
        });
    }
}
