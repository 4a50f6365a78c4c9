//! Accept header enforcement policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How strictly the `Accept` header is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AcceptHeaderPolicy {
    /// A missing `Accept` header is treated as "accepts anything".
    #[default]
    Default,
    /// The `Accept` header is never inspected.
    Ignore,
    /// The client must send an `Accept` header naming the media type or `*/*`.
    Require,
}

impl AcceptHeaderPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcceptHeaderPolicy::Default => "default",
            AcceptHeaderPolicy::Ignore => "ignore",
            AcceptHeaderPolicy::Require => "require",
        }
    }
}

impl fmt::Display for AcceptHeaderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown accept header policy '{0}' (expected default, ignore or require)")]
pub struct UnknownAcceptPolicy(pub String);

impl FromStr for AcceptHeaderPolicy {
    type Err = UnknownAcceptPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(AcceptHeaderPolicy::Default),
            "ignore" => Ok(AcceptHeaderPolicy::Ignore),
            "require" => Ok(AcceptHeaderPolicy::Require),
            _ => Err(UnknownAcceptPolicy(s.to_string())),
        }
    }
}
