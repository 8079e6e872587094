//! Location domain models.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::math::{format_coordinates, is_rounded_equal};

/// Opaque identifier assigned to a place by the search provider.
///
/// Providers disagree on whether ids are numbers or strings; they are always
/// carried as strings here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(String);

impl PlaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlaceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlaceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Compares both axes after rounding to `places` decimals.
    pub fn rounded_eq(&self, other: &Coordinates, places: u32) -> bool {
        is_rounded_equal(self.latitude, other.latitude, places)
            && is_rounded_equal(self.longitude, other.longitude, places)
    }
}

/// A selected location: what the map shows and what the form submits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// `None` for a manually dragged pin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<PlaceId>,
    pub zoom: u8,
}

impl Location {
    pub fn new(
        display_name: impl Into<String>,
        coordinates: Coordinates,
        place_id: Option<PlaceId>,
        zoom: u8,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            place_id,
            zoom,
        }
    }

    /// A seed with no known address: empty name at (0, 0).
    pub fn blank(zoom: u8) -> Self {
        Self::new("", Coordinates::new(0.0, 0.0), None, zoom)
    }

    /// A pin dropped by dragging the map, labelled with its raw coordinates.
    pub fn dropped_pin(center: Coordinates, zoom: u8) -> Self {
        Self::new(
            format_coordinates(center.latitude, center.longitude),
            center,
            None,
            zoom,
        )
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Copy of this location at a different zoom level.
    pub fn with_zoom(&self, zoom: u8) -> Self {
        Self {
            zoom,
            ..self.clone()
        }
    }

    /// True for the empty placeholder seed.
    pub fn is_blank(&self) -> bool {
        self.display_name.is_empty()
            && self.place_id.is_none()
            && self.latitude == 0.0
            && self.longitude == 0.0
    }

    /// True when the location carries real (non-zero) coordinates.
    pub fn has_coordinates(&self) -> bool {
        self.latitude != 0.0 && self.longitude != 0.0
    }
}
