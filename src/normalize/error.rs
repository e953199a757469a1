use crate::analysis::Endpoint;
use crate::normalize::NormalizerKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Malformed {normalizer} response: {reason}")]
    MalformedResponse {
        normalizer: NormalizerKind,
        reason: String,
    },

    #[error("Malformed {normalizer} response: item {index} could not be decoded")]
    MalformedItem {
        normalizer: NormalizerKind,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    // Dropdown lists from /locations and /metrics
    #[error("Malformed option list from {endpoint}: {reason}")]
    MalformedOptions { endpoint: Endpoint, reason: String },
}
