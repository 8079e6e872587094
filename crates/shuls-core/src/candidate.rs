//! Search candidate models.

use serde::{Deserialize, Serialize};

use crate::location::{Coordinates, Location, PlaceId};
use crate::text::TextDirection;

/// Provider that produced a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CandidateSource {
    /// Google Places autocomplete: no coordinates until details are fetched
    Google,
    /// OpenStreetMap Nominatim: coordinates included
    Osm,
    Other(String),
}

impl CandidateSource {
    pub fn parse(source: &str) -> Self {
        match source {
            "google" => Self::Google,
            "osm" => Self::Osm,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for CandidateSource {
    fn from(source: String) -> Self {
        Self::parse(&source)
    }
}

impl From<CandidateSource> for String {
    fn from(source: CandidateSource) -> Self {
        match source {
            CandidateSource::Google => "google".to_string(),
            CandidateSource::Osm => "osm".to_string(),
            CandidateSource::Other(other) => other,
        }
    }
}

impl Default for CandidateSource {
    fn default() -> Self {
        Self::Osm
    }
}

/// A single search result returned by the address gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Provider-scoped unique id (used as list key)
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<PlaceId>,
    pub display_name: String,
    /// Absent when the provider requires a details lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub source: CandidateSource,
}

impl Candidate {
    /// A candidate that already carries coordinates.
    pub fn located(
        display_name: impl Into<String>,
        coordinates: Coordinates,
        place_id: Option<PlaceId>,
    ) -> Self {
        let display_name = display_name.into();
        Self {
            id: place_id
                .as_ref()
                .map(|p| p.to_string())
                .unwrap_or_else(|| display_name.clone()),
            place_id,
            display_name,
            coordinates: Some(coordinates),
            source: CandidateSource::Osm,
        }
    }

    /// A candidate that must be resolved through a details lookup.
    pub fn unresolved(display_name: impl Into<String>, place_id: PlaceId) -> Self {
        Self {
            id: place_id.to_string(),
            place_id: Some(place_id),
            display_name: display_name.into(),
            coordinates: None,
            source: CandidateSource::Google,
        }
    }

    pub fn with_source(mut self, source: CandidateSource) -> Self {
        self.source = source;
        self
    }

    /// True when coordinates must be fetched before the candidate can be committed.
    pub fn needs_details(&self) -> bool {
        self.coordinates.is_none()
    }

    /// Converts a located candidate into a [`Location`] at `zoom`.
    ///
    /// Returns `None` for candidates that still need a details lookup.
    pub fn to_location(&self, zoom: u8) -> Option<Location> {
        self.coordinates.map(|coordinates| {
            Location::new(
                self.display_name.clone(),
                coordinates,
                self.place_id.clone(),
                zoom,
            )
        })
    }

    pub fn text_direction(&self) -> TextDirection {
        TextDirection::for_text(&self.display_name)
    }
}

/// Outcome of the most recent candidate search, as shown in the dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchResults {
    /// Nothing has been searched for yet
    #[default]
    NotSearched,
    /// The search ran and matched nothing; not an error
    NoResults { query: String },
    Found {
        query: String,
        candidates: Vec<Candidate>,
    },
    /// The search failed; the query stays editable
    Failed { query: String, message: String },
}

impl SearchResults {
    pub fn from_candidates(query: impl Into<String>, candidates: Vec<Candidate>) -> Self {
        let query = query.into();
        if candidates.is_empty() {
            Self::NoResults { query }
        } else {
            Self::Found { query, candidates }
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        match self {
            Self::Found { candidates, .. } => candidates,
            _ => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}
