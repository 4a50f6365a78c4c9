//! Normalized encoder options.

use crate::config::schema::EncoderOptionsConfig;

/// Pretty-print the encoded document.
pub const JSON_PRETTY_PRINT: u32 = 128;

/// Default serialization flags.
pub const DEFAULT_OPTIONS: u32 = 0;

/// Default maximum nesting depth of an encoded document.
pub const DEFAULT_DEPTH: usize = 512;

/// Options applied by an encoder when writing documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderOptions {
    options: u32,
    url_prefix: Option<String>,
    depth: usize,
}

impl EncoderOptions {
    pub fn new(options: u32, url_prefix: Option<String>, depth: usize) -> Self {
        Self {
            options,
            url_prefix,
            depth,
        }
    }

    /// Apply defaults to the fields missing from `config`.
    pub fn from_config(config: &EncoderOptionsConfig) -> Self {
        Self {
            options: config.options.unwrap_or(DEFAULT_OPTIONS),
            url_prefix: config.url_prefix.clone(),
            depth: config.depth.unwrap_or(DEFAULT_DEPTH),
        }
    }

    pub fn options(&self) -> u32 {
        self.options
    }

    pub fn url_prefix(&self) -> Option<&str> {
        self.url_prefix.as_deref()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn pretty_print(&self) -> bool {
        self.options & JSON_PRETTY_PRINT != 0
    }
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self::new(DEFAULT_OPTIONS, None, DEFAULT_DEPTH)
    }
}
