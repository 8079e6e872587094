//! "Use my current location" support.
//!
//! Wraps a platform geolocation provider behind [`Geolocator`] and maps its
//! failure codes onto the four user-facing categories.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::location::Coordinates;

/// Failure categories reported by a platform geolocation API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeolocationError {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unknown,
}

impl GeolocationError {
    /// Maps a W3C `GeolocationPositionError.code` to a category.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::PositionUnavailable,
            3 => Self::Timeout,
            _ => Self::Unknown,
        }
    }

    /// User-facing message, distinct per category.
    pub fn message(&self) -> &'static str {
        match self {
            Self::PermissionDenied => {
                "Location access was denied. Check your browser's site settings to enable location."
            }
            Self::PositionUnavailable => "Location information is unavailable. Please try again.",
            Self::Timeout => "Location request timed out. Please try again.",
            Self::Unknown => "Unable to retrieve your location.",
        }
    }
}

impl fmt::Display for GeolocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::PermissionDenied => "permission denied",
            Self::PositionUnavailable => "position unavailable",
            Self::Timeout => "timeout",
            Self::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

impl std::error::Error for GeolocationError {}

/// Source of the device's current position.
#[async_trait]
pub trait Geolocator: Send + Sync {
    /// Resolves the current position once.
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_maps_w3c_codes() {
        assert_eq!(GeolocationError::from_code(1), GeolocationError::PermissionDenied);
        assert_eq!(GeolocationError::from_code(2), GeolocationError::PositionUnavailable);
        assert_eq!(GeolocationError::from_code(3), GeolocationError::Timeout);
        assert_eq!(GeolocationError::from_code(0), GeolocationError::Unknown);
        assert_eq!(GeolocationError::from_code(42), GeolocationError::Unknown);
    }

    #[test]
    fn test_every_category_has_its_own_message() {
        let all = [
            GeolocationError::PermissionDenied,
            GeolocationError::PositionUnavailable,
            GeolocationError::Timeout,
            GeolocationError::Unknown,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.message(), b.message());
            }
        }
    }

    #[test]
    fn test_messages_match_site_wording() {
        assert_eq!(
            GeolocationError::PermissionDenied.message(),
            "Location access was denied. Check your browser's site settings to enable location."
        );
        assert_eq!(
            GeolocationError::PositionUnavailable.message(),
            "Location information is unavailable. Please try again."
        );
        assert_eq!(
            GeolocationError::Timeout.message(),
            "Location request timed out. Please try again."
        );
        assert_eq!(
            GeolocationError::Unknown.message(),
            "Unable to retrieve your location."
        );
    }
}
