//! Encoder registry.
//!
//! # Responsibilities
//! - Hold the shared schema mapping and the named encoder configurations
//! - Build each named encoder on first use and hand out the same instance afterwards
//!
//! # Design Decisions
//! - The empty name is the default encoder and is always resolvable
//! - Construction happens under the cache shard lock so concurrent first
//!   requests for a name observe a single instance
//! - Unknown names are a caller error; there is no fallback to the default

use dashmap::DashMap;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::schema::{EncoderConfig, EncoderOptionsConfig, EncoderServiceConfig, JsonApiSetting, SchemaDescriptor};
use crate::encoding::encoder::Encoder;
use crate::encoding::error::EncoderError;
use crate::encoding::options::EncoderOptions;
use crate::observability::metrics;

/// Name of the default encoder.
pub const DEFAULT_ENCODER: &str = "";

/// Meta key that supplies the `jsonapi` object's meta when `jsonapi = true`.
const API_VERSION_META_KEY: &str = "apiVersion";

/// Produces and caches one encoder per configured name.
#[derive(Debug)]
pub struct EncoderService {
    schemas: Arc<HashMap<String, SchemaDescriptor>>,
    configs: HashMap<String, EncoderConfig>,
    cache: DashMap<String, Arc<Encoder>>,
}

impl EncoderService {
    pub fn new(config: EncoderServiceConfig) -> Self {
        let EncoderServiceConfig {
            schemas,
            mut encoders,
            default,
        } = config;

        // An explicit `encoders.""` entry takes precedence over the top-level keys.
        encoders.entry(DEFAULT_ENCODER.to_string()).or_insert(default);

        Self {
            schemas: Arc::new(schemas),
            configs: encoders,
            cache: DashMap::new(),
        }
    }

    /// Returns the encoder registered under `name`, building it on first use.
    pub fn get_encoder(&self, name: &str) -> Result<Arc<Encoder>, EncoderError> {
        if let Some(encoder) = self.cache.get(name) {
            return Ok(Arc::clone(encoder.value()));
        }

        let config = self
            .configs
            .get(name)
            .ok_or_else(|| EncoderError::UnknownEncoder {
                name: name.to_string(),
            })?;

        let entry = self
            .cache
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(self.build(name, config)));
        Ok(Arc::clone(entry.value()))
    }

    pub fn default_encoder(&self) -> Result<Arc<Encoder>, EncoderError> {
        self.get_encoder(DEFAULT_ENCODER)
    }

    /// Normalize raw encoder options, applying defaults for missing fields.
    pub fn encoder_options(config: &EncoderOptionsConfig) -> EncoderOptions {
        EncoderOptions::from_config(config)
    }

    /// Number of encoders built so far.
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    pub fn schemas(&self) -> &HashMap<String, SchemaDescriptor> {
        &self.schemas
    }

    fn build(&self, name: &str, config: &EncoderConfig) -> Encoder {
        let options = Self::encoder_options(&config.encoder_options);
        let mut encoder = Encoder::new(Arc::clone(&self.schemas), options);

        if let Some(meta) = &config.meta {
            encoder = encoder.with_meta(meta.clone());
        }

        match &config.jsonapi {
            JsonApiSetting::WithMeta(version_meta) => {
                encoder = encoder.with_jsonapi_version(Some(Value::Object(version_meta.clone())));
            }
            JsonApiSetting::Enabled(true) => {
                let version_meta = config
                    .meta
                    .as_ref()
                    .and_then(|meta| meta.get(API_VERSION_META_KEY))
                    .map(|api_version| {
                        let mut version_meta = Map::new();
                        version_meta.insert(API_VERSION_META_KEY.to_string(), api_version.clone());
                        Value::Object(version_meta)
                    });
                encoder = encoder.with_jsonapi_version(version_meta);
            }
            JsonApiSetting::Enabled(false) => {}
        }

        tracing::info!(
            encoder = display_name(name),
            jsonapi = encoder.is_add_jsonapi_version(),
            depth = encoder.options().depth(),
            "Encoder constructed"
        );
        metrics::record_encoder_built(display_name(name));

        encoder
    }
}

fn display_name(name: &str) -> &str {
    if name == DEFAULT_ENCODER {
        "default"
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::options::JSON_PRETTY_PRINT;
    use serde_json::json;
    use std::thread;

    fn meta(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn service() -> EncoderService {
        let mut encoders = HashMap::new();
        encoders.insert(
            "test-1".to_string(),
            EncoderConfig {
                jsonapi: JsonApiSetting::Enabled(true),
                meta: Some(meta(json!({"apiVersion": "1.0"}))),
                encoder_options: EncoderOptionsConfig {
                    options: Some(JSON_PRETTY_PRINT),
                    url_prefix: Some("/".to_string()),
                    depth: Some(512),
                },
            },
        );
        encoders.insert(
            "test-2".to_string(),
            EncoderConfig {
                jsonapi: JsonApiSetting::WithMeta(meta(json!({"extensions": "bulk"}))),
                meta: Some(meta(json!({"apiVersion": "1.0"}))),
                ..Default::default()
            },
        );

        EncoderService::new(EncoderServiceConfig {
            encoders,
            ..Default::default()
        })
    }

    #[test]
    fn test_get_default_encoder() {
        let encoder = service().default_encoder().unwrap();
        assert_eq!(encoder.options(), &EncoderOptions::default());
    }

    #[test]
    fn test_get_named_encoder() {
        let service = service();
        let first = service.get_encoder("test-1").unwrap();
        assert!(first.options().pretty_print());
        assert_eq!(first.options().url_prefix(), Some("/"));
        assert!(service.get_encoder("test-2").unwrap().is_add_jsonapi_version());
    }

    #[test]
    fn test_get_unconfigured_encoder() {
        let err = service().get_encoder("missing").unwrap_err();
        assert!(matches!(err, EncoderError::UnknownEncoder { ref name } if name == "missing"));
    }

    #[test]
    fn test_encoder_is_singleton() {
        let service = service();
        let encoder = service.default_encoder().unwrap();
        assert!(Arc::ptr_eq(&encoder, &service.get_encoder("").unwrap()));

        let named = service.get_encoder("test-1").unwrap();
        assert!(Arc::ptr_eq(&named, &service.get_encoder("test-1").unwrap()));
        assert_eq!(service.cached_count(), 2);
    }

    #[test]
    fn test_concurrent_first_access_builds_once() {
        let service = Arc::new(service());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = Arc::clone(&service);
                thread::spawn(move || service.get_encoder("test-2").unwrap())
            })
            .collect();
        let encoders: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(encoders.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
        assert_eq!(service.cached_count(), 1);
    }

    #[test]
    fn test_get_encoder_options_defaults() {
        let options = EncoderService::encoder_options(&EncoderOptionsConfig::default());
        assert_eq!(options.options(), 0);
        assert_eq!(options.url_prefix(), None);
        assert_eq!(options.depth(), 512);
    }

    #[test]
    fn test_get_encoder_options() {
        let configs = [
            EncoderOptionsConfig {
                options: Some(0),
                url_prefix: None,
                depth: Some(512),
            },
            EncoderOptionsConfig {
                options: Some(JSON_PRETTY_PRINT),
                url_prefix: Some("/".to_string()),
                depth: Some(1024),
            },
        ];

        for config in &configs {
            let options = EncoderService::encoder_options(config);
            assert_eq!(Some(options.options()), config.options);
            assert_eq!(options.url_prefix(), config.url_prefix.as_deref());
            assert_eq!(Some(options.depth()), config.depth);
        }
    }

    #[test]
    fn test_set_meta_and_jsonapi_version() {
        let encoder = EncoderService::new(EncoderServiceConfig::default())
            .default_encoder()
            .unwrap();
        assert!(encoder.meta().is_none());
        assert!(!encoder.is_add_jsonapi_version());
        assert!(encoder.jsonapi_version_meta().is_none());

        let encoder = EncoderService::new(EncoderServiceConfig {
            default: EncoderConfig {
                jsonapi: JsonApiSetting::Enabled(true),
                meta: Some(meta(json!({"apiVersion": "1.0"}))),
                ..Default::default()
            },
            ..Default::default()
        })
        .default_encoder()
        .unwrap();
        assert_eq!(encoder.meta(), Some(&meta(json!({"apiVersion": "1.0"}))));
        assert!(encoder.is_add_jsonapi_version());
        assert_eq!(encoder.jsonapi_version_meta(), Some(&json!({"apiVersion": "1.0"})));

        let document: Value = serde_json::from_str(&encoder.encode_data("article", &Value::Null).unwrap()).unwrap();
        assert_eq!(
            document["jsonapi"],
            json!({"version": "1.0", "meta": {"apiVersion": "1.0"}})
        );

        let encoder = EncoderService::new(EncoderServiceConfig {
            default: EncoderConfig {
                jsonapi: JsonApiSetting::WithMeta(meta(json!({"foo": "bar"}))),
                ..Default::default()
            },
            ..Default::default()
        })
        .default_encoder()
        .unwrap();
        assert_eq!(encoder.jsonapi_version_meta(), Some(&json!({"foo": "bar"})));
        assert!(encoder.is_add_jsonapi_version());
    }

    #[test]
    fn test_meta_without_jsonapi_sets_no_version_meta() {
        let encoder = EncoderService::new(EncoderServiceConfig {
            default: EncoderConfig {
                meta: Some(meta(json!({"apiVersion": "1.0"}))),
                ..Default::default()
            },
            ..Default::default()
        })
        .default_encoder()
        .unwrap();

        assert!(!encoder.is_add_jsonapi_version());
        assert!(encoder.jsonapi_version_meta().is_none());
    }

    #[test]
    fn test_explicit_default_entry_wins() {
        let mut encoders = HashMap::new();
        encoders.insert(
            DEFAULT_ENCODER.to_string(),
            EncoderConfig {
                jsonapi: JsonApiSetting::Enabled(true),
                ..Default::default()
            },
        );
        let service = EncoderService::new(EncoderServiceConfig {
            encoders,
            ..Default::default()
        });

        let encoder = service.default_encoder().unwrap();
        assert!(encoder.is_add_jsonapi_version());
        assert!(encoder.jsonapi_version_meta().is_none());
    }

    #[test]
    fn test_jsonapi_flag_without_api_version_omits_version_meta() {
        let encoder = EncoderService::new(EncoderServiceConfig {
            default: EncoderConfig {
                jsonapi: JsonApiSetting::Enabled(true),
                meta: Some(meta(json!({"copyright": "Example Corp"}))),
                ..Default::default()
            },
            ..Default::default()
        })
        .default_encoder()
        .unwrap();

        assert!(encoder.is_add_jsonapi_version());
        assert!(encoder.jsonapi_version_meta().is_none());
        assert_eq!(encoder.meta(), Some(&meta(json!({"copyright": "Example Corp"}))));

        let document: Value = serde_json::from_str(&encoder.encode_data("article", &Value::Null).unwrap()).unwrap();
        assert_eq!(document["jsonapi"], json!({"version": "1.0"}));
    }

    #[test]
    fn test_jsonapi_flag_alone_omits_version_meta() {
        let encoder = EncoderService::new(EncoderServiceConfig {
            default: EncoderConfig {
                jsonapi: JsonApiSetting::Enabled(true),
                ..Default::default()
            },
            ..Default::default()
        })
        .default_encoder()
        .unwrap();

        assert!(encoder.is_add_jsonapi_version());
        assert!(encoder.jsonapi_version_meta().is_none());
        assert!(encoder.meta().is_none());
    }
}
