//! Error types for the location selection core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geolocation::GeolocationError;

/// A shared error type for every shuls crate.
///
/// None of these conditions is fatal to the host page: each one is surfaced
/// as a message while the previous valid selection stays intact.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShulsError {
    /// Network or parse failure while searching for candidates
    #[error("Search failed: {message}")]
    SearchFailed { message: String },

    /// A candidate needing a second round trip could not be resolved
    #[error("Details lookup failed for '{place_id}': {message}")]
    DetailsLookupFailed { place_id: String, message: String },

    /// Platform geolocation failure
    #[error("Geolocation error: {0}")]
    Geolocation(GeolocationError),

    /// History navigation to an index that does not exist
    #[error("History index {index} out of range (len {len})")]
    HistoryIndexOutOfRange { index: usize, len: usize },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShulsError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a SearchFailed error
    pub fn search_failed(message: impl Into<String>) -> Self {
        Self::SearchFailed {
            message: message.into(),
        }
    }

    /// Creates a DetailsLookupFailed error
    pub fn details_failed(place_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DetailsLookupFailed {
            place_id: place_id.into(),
            message: message.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a candidate search failure
    pub fn is_search_failed(&self) -> bool {
        matches!(self, Self::SearchFailed { .. })
    }

    /// Check if this is a details lookup failure
    pub fn is_details_failed(&self) -> bool {
        matches!(self, Self::DetailsLookupFailed { .. })
    }

    /// Check if this is a geolocation failure
    pub fn is_geolocation(&self) -> bool {
        matches!(self, Self::Geolocation(_))
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Message suitable for showing next to the address input.
    ///
    /// Network details stay in the logs; the user only learns that the
    /// action can be retried.
    pub fn user_message(&self) -> String {
        match self {
            Self::SearchFailed { .. } => "An error occurred. Please try again.".to_string(),
            Self::DetailsLookupFailed { .. } => {
                "Could not load that address. Please try again.".to_string()
            }
            Self::Geolocation(err) => err.message().to_string(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<GeolocationError> for ShulsError {
    fn from(err: GeolocationError) -> Self {
        Self::Geolocation(err)
    }
}

impl From<std::io::Error> for ShulsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ShulsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ShulsError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ShulsError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ShulsError>`.
pub type Result<T> = std::result::Result<T, ShulsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_failed_hides_network_details_from_user() {
        let err = ShulsError::search_failed("connection reset by peer");
        assert!(err.is_search_failed());
        assert!(err.to_string().contains("connection reset"));
        assert_eq!(err.user_message(), "An error occurred. Please try again.");
    }

    #[test]
    fn test_geolocation_conversion_keeps_category() {
        let err: ShulsError = GeolocationError::PermissionDenied.into();
        assert!(err.is_geolocation());
        assert_eq!(err.user_message(), GeolocationError::PermissionDenied.message());
    }

    #[test]
    fn test_json_error_becomes_serialization() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: ShulsError = parse.unwrap_err().into();
        assert!(matches!(err, ShulsError::Serialization { ref format, .. } if format == "JSON"));
    }
}
