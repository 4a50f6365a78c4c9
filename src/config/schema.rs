//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

use crate::negotiation::{AcceptHeaderPolicy, JSON_API_MEDIA_TYPE};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Media type enforcement.
    pub negotiation: NegotiationConfig,

    /// Schemas and named encoders.
    pub encoding: EncoderServiceConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Content negotiation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NegotiationConfig {
    /// Canonical media type required on requests and responses.
    pub media_type: String,

    /// How the Accept header is enforced.
    pub accept_policy: AcceptHeaderPolicy,
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            media_type: JSON_API_MEDIA_TYPE.to_string(),
            accept_policy: AcceptHeaderPolicy::Default,
        }
    }
}

/// Encoder registry configuration.
///
/// The top-level `jsonapi`, `meta` and `encoder-options` keys configure the
/// default (unnamed) encoder unless `encoders.""` is given explicitly.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EncoderServiceConfig {
    /// Type identifier → schema, shared by every encoder.
    pub schemas: HashMap<String, SchemaDescriptor>,

    /// Named encoder configurations. The empty name is the default encoder.
    pub encoders: HashMap<String, EncoderConfig>,

    #[serde(flatten)]
    pub default: EncoderConfig,
}

/// Configuration of a single encoder.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct EncoderConfig {
    /// Emit a top-level `jsonapi` object (bool), optionally with version meta (table).
    pub jsonapi: JsonApiSetting,

    /// Document-level meta.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,

    #[serde(rename = "encoder-options")]
    pub encoder_options: EncoderOptionsConfig,
}

/// The `jsonapi` key: either a flag or the version meta to emit.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum JsonApiSetting {
    Enabled(bool),
    WithMeta(Map<String, Value>),
}

impl Default for JsonApiSetting {
    fn default() -> Self {
        JsonApiSetting::Enabled(false)
    }
}

/// Raw encoder options; missing fields fall back to documented defaults.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct EncoderOptionsConfig {
    /// Serialization flags (default: 0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<u32>,

    /// Prefix for generated links (default: none).
    #[serde(rename = "urlPrefix", skip_serializing_if = "Option::is_none")]
    pub url_prefix: Option<String>,

    /// Maximum document nesting depth (default: 512).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
}

/// How a domain type maps to a JSON:API resource object.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SchemaDescriptor {
    /// Value of the resource object's `type` member.
    pub resource_type: String,

    /// Field holding the resource identifier (default: "id").
    #[serde(default = "default_id_field")]
    pub id_field: String,

    /// Field name → related resource type.
    #[serde(default)]
    pub relationships: BTreeMap<String, String>,
}

impl SchemaDescriptor {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id_field: default_id_field(),
            relationships: BTreeMap::new(),
        }
    }

    pub fn with_relationship(mut self, field: impl Into<String>, related_type: impl Into<String>) -> Self {
        self.relationships.insert(field.into(), related_type.into());
        self
    }
}

fn default_id_field() -> String {
    "id".to_string()
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
