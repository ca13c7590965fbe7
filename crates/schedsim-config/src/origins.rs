// crates/schedsim-config/src/origins.rs
// ============================================================================
// Module: Origin Validation
// Description: Absolute-URL validation for the CORS origin allow-list.
// Purpose: Reject malformed origins before they reach server wiring.
// Dependencies: thiserror, url
// ============================================================================

//! ## Overview
//! Validates that every entry of the origin allow-list parses as an absolute
//! URL. Checking follows input order and stops at the first malformed entry,
//! naming its index and raw value. An empty list is valid.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Origin Errors
// ============================================================================

/// Malformed entry in the origin allow-list.
#[derive(Debug, Error)]
#[error("invalid url at index {index}: {origin}: {source}")]
pub struct InvalidOriginError {
    /// Zero-based index of the malformed entry.
    pub index: usize,
    /// Raw value of the malformed entry.
    pub origin: String,
    /// Underlying URL parse failure.
    #[source]
    pub source: url::ParseError,
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates that every origin is a well-formed absolute URL.
///
/// # Errors
///
/// Returns [`InvalidOriginError`] for the first entry that does not parse
/// as an absolute URL.
pub fn validate_origins(origins: &[String]) -> Result<(), InvalidOriginError> {
    for (index, origin) in origins.iter().enumerate() {
        if let Err(source) = Url::parse(origin) {
            return Err(InvalidOriginError {
                index,
                origin: origin.clone(),
                source,
            });
        }
    }
    Ok(())
}
