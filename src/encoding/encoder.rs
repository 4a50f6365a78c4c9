//! JSON:API document encoder.
//!
//! # Responsibilities
//! - Map serialized domain values to resource objects using their schema
//! - Add `jsonapi` and `meta` top-level members as configured
//! - Enforce the maximum document depth
//!
//! # Design Decisions
//! - Unregistered type identifiers encode with the identifier as resource type
//! - Relationship values may be bare identifiers or objects with an `id`
//! - Self links are always emitted, prefixed with the configured URL prefix

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::schema::SchemaDescriptor;
use crate::encoding::error::EncoderError;
use crate::encoding::options::EncoderOptions;

/// JSON:API version advertised in the `jsonapi` object.
pub const JSON_API_VERSION: &str = "1.0";

/// A single entry of an `errors` document.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ErrorObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// A configured document encoder.
#[derive(Debug)]
pub struct Encoder {
    schemas: Arc<HashMap<String, SchemaDescriptor>>,
    options: EncoderOptions,
    meta: Option<Map<String, Value>>,
    add_jsonapi_version: bool,
    jsonapi_version_meta: Option<Value>,
}

impl Encoder {
    pub fn new(schemas: Arc<HashMap<String, SchemaDescriptor>>, options: EncoderOptions) -> Self {
        Self {
            schemas,
            options,
            meta: None,
            add_jsonapi_version: false,
            jsonapi_version_meta: None,
        }
    }

    /// Set the document-level meta.
    pub fn with_meta(mut self, meta: Map<String, Value>) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Emit a top-level `jsonapi` object, optionally carrying `meta`.
    pub fn with_jsonapi_version(mut self, version_meta: Option<Value>) -> Self {
        self.add_jsonapi_version = true;
        self.jsonapi_version_meta = version_meta;
        self
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    pub fn meta(&self) -> Option<&Map<String, Value>> {
        self.meta.as_ref()
    }

    pub fn is_add_jsonapi_version(&self) -> bool {
        self.add_jsonapi_version
    }

    pub fn jsonapi_version_meta(&self) -> Option<&Value> {
        self.jsonapi_version_meta.as_ref()
    }

    /// Encode a single value, a sequence of values or `null` as primary data.
    pub fn encode_data<T>(&self, type_id: &str, data: &T) -> Result<String, EncoderError>
    where
        T: Serialize + ?Sized,
    {
        let primary = match serde_json::to_value(data)? {
            Value::Null => Value::Null,
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| self.resource_object(type_id, item))
                    .collect::<Result<Vec<_>, EncoderError>>()?,
            ),
            item => self.resource_object(type_id, item)?,
        };

        let mut document = Map::new();
        document.insert("data".to_string(), primary);
        self.finish(document)
    }

    /// Encode an `errors` document.
    pub fn encode_errors(&self, errors: &[ErrorObject]) -> Result<String, EncoderError> {
        let mut document = Map::new();
        document.insert("errors".to_string(), serde_json::to_value(errors)?);
        self.finish(document)
    }

    fn resource_object(&self, type_id: &str, value: Value) -> Result<Value, EncoderError> {
        let fallback;
        let schema = match self.schemas.get(type_id) {
            Some(schema) => schema,
            None => {
                fallback = SchemaDescriptor::new(type_id);
                &fallback
            }
        };

        let Value::Object(mut attributes) = value else {
            return Err(EncoderError::NotAnObject {
                type_id: type_id.to_string(),
            });
        };

        let id = attributes
            .remove(&schema.id_field)
            .as_ref()
            .and_then(identifier)
            .ok_or_else(|| EncoderError::MissingId {
                type_id: type_id.to_string(),
                field: schema.id_field.clone(),
            })?;

        let mut relationships = Map::new();
        for (field, related_type) in &schema.relationships {
            let Some(related) = attributes.remove(field) else {
                continue;
            };
            let data = match related {
                Value::Null => Value::Null,
                Value::Array(items) => Value::Array(
                    items
                        .iter()
                        .filter_map(|item| resource_identifier(related_type, item))
                        .collect(),
                ),
                item => resource_identifier(related_type, &item).unwrap_or(Value::Null),
            };
            let mut relationship = Map::new();
            relationship.insert("data".to_string(), data);
            relationships.insert(field.clone(), Value::Object(relationship));
        }

        let mut resource = Map::new();
        resource.insert("type".to_string(), Value::String(schema.resource_type.clone()));
        resource.insert("id".to_string(), Value::String(id.clone()));
        if !attributes.is_empty() {
            resource.insert("attributes".to_string(), Value::Object(attributes));
        }
        if !relationships.is_empty() {
            resource.insert("relationships".to_string(), Value::Object(relationships));
        }

        let mut links = Map::new();
        links.insert(
            "self".to_string(),
            Value::String(self.self_link(&schema.resource_type, &id)),
        );
        resource.insert("links".to_string(), Value::Object(links));

        Ok(Value::Object(resource))
    }

    fn self_link(&self, resource_type: &str, id: &str) -> String {
        let prefix = self.options.url_prefix().unwrap_or_default();
        format!("{}/{}/{}", prefix.trim_end_matches('/'), resource_type, id)
    }

    fn finish(&self, mut document: Map<String, Value>) -> Result<String, EncoderError> {
        if self.add_jsonapi_version {
            let mut jsonapi = Map::new();
            jsonapi.insert("version".to_string(), Value::String(JSON_API_VERSION.to_string()));
            if let Some(meta) = &self.jsonapi_version_meta {
                jsonapi.insert("meta".to_string(), meta.clone());
            }
            document.insert("jsonapi".to_string(), Value::Object(jsonapi));
        }
        if let Some(meta) = &self.meta {
            document.insert("meta".to_string(), Value::Object(meta.clone()));
        }

        let document = Value::Object(document);
        let depth = nesting_depth(&document);
        if depth > self.options.depth() {
            return Err(EncoderError::DepthExceeded {
                depth,
                limit: self.options.depth(),
            });
        }

        let encoded = if self.options.pretty_print() {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(encoded)
    }
}

fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn resource_identifier(resource_type: &str, value: &Value) -> Option<Value> {
    let id = match value {
        Value::Object(fields) => fields.get("id").and_then(identifier)?,
        other => identifier(other)?,
    };

    let mut linkage = Map::new();
    linkage.insert("type".to_string(), Value::String(resource_type.to_string()));
    linkage.insert("id".to_string(), Value::String(id));
    Some(Value::Object(linkage))
}

/// Number of nested arrays/objects, counting the outermost one.
fn nesting_depth(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(nesting_depth).max().unwrap_or(0),
        Value::Object(fields) => 1 + fields.values().map(nesting_depth).max().unwrap_or(0),
        _ => 0,
    }
}
