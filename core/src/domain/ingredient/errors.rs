use std::time::Duration;

use thiserror::Error;

/// Why a single ingredient could not be enriched.
///
/// Never leaves the resolution pipeline: every variant is converted into the
/// fallback record there. Only the explicit refresh operation surfaces it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnrichmentError {
    #[error("Enrichment request failed: {0}")]
    Request(String),

    #[error("Enrichment timed out after {0:?}")]
    Timeout(Duration),

    #[error("Malformed enrichment response: {0}")]
    MalformedResponse(String),

    #[error("Enrichment response failed validation: {0}")]
    Validation(String),
}
