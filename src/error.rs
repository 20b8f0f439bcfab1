//! Error type shared by the parser, the aggregator and the configuration loader.

use std::str::Utf8Error;

/// Errors raised while turning a registry file into a network list.
#[derive(Debug, thiserror::Error)]
pub enum RoutesError {
    #[error("Registry data is not valid UTF-8: {0}")]
    Decode(#[from] Utf8Error),

    #[error("Malformed registry record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Invalid CIDR '{cidr}': {reason}")]
    InvalidCidr { cidr: String, reason: String },

    #[error("Invalid value for {key}: '{value}'")]
    Config { key: String, value: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl RoutesError {
    pub(crate) fn invalid_cidr(cidr: &str, reason: impl Into<String>) -> Self {
        RoutesError::InvalidCidr {
            cidr: cidr.to_string(),
            reason: reason.into(),
        }
    }
}
