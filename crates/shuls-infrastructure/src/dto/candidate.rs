use serde::{Deserialize, Serialize};
use shuls_core::{Candidate, CandidateSource, Coordinates, PlaceId};

/// Identifier that some providers send as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlexibleId {
    Text(String),
    Number(i64),
}

impl FlexibleId {
    pub fn into_string(self) -> String {
        match self {
            FlexibleId::Text(text) => text,
            FlexibleId::Number(number) => number.to_string(),
        }
    }
}

/// Coordinate component sent either as a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlexibleNumber {
    Number(f64),
    Text(String),
}

impl FlexibleNumber {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FlexibleNumber::Number(value) => Some(*value),
            FlexibleNumber::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// One search result, or a details response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateDto {
    #[serde(default)]
    pub id: Option<FlexibleId>,
    #[serde(default)]
    pub place_id: Option<FlexibleId>,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Short name; used when `display_name` is missing
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lat: Option<FlexibleNumber>,
    #[serde(default)]
    pub lon: Option<FlexibleNumber>,
    #[serde(default)]
    pub source: Option<String>,
}

impl From<CandidateDto> for Candidate {
    fn from(dto: CandidateDto) -> Self {
        let place_id = dto.place_id.map(|id| PlaceId::new(id.into_string()));
        let display_name = dto
            .display_name
            .filter(|name| !name.is_empty())
            .or(dto.name)
            .unwrap_or_default();
        let coordinates = match (
            dto.lat.as_ref().and_then(FlexibleNumber::as_f64),
            dto.lon.as_ref().and_then(FlexibleNumber::as_f64),
        ) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        };
        let id = dto
            .id
            .map(FlexibleId::into_string)
            .or_else(|| place_id.as_ref().map(|p| p.to_string()))
            .unwrap_or_else(|| display_name.clone());
        let source = dto
            .source
            .map(|s| CandidateSource::parse(&s))
            .unwrap_or_default();

        Candidate {
            id,
            place_id,
            display_name,
            coordinates,
            source,
        }
    }
}

/// Envelope distinguishing a `{error}` body from a successful payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LookupResponse<T> {
    Failure { error: String },
    Success(T),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_result_without_coordinates() {
        let json = r#"{
            "id": "ChIJ123",
            "place_id": "ChIJ123",
            "display_name": "Young Israel of Hollywood",
            "lat": null,
            "lon": null,
            "source": "google"
        }"#;
        let dto: CandidateDto = serde_json::from_str(json).unwrap();
        let candidate = Candidate::from(dto);

        assert!(candidate.needs_details());
        assert_eq!(candidate.place_id, Some(PlaceId::new("ChIJ123")));
        assert_eq!(candidate.source, CandidateSource::Google);
    }

    #[test]
    fn test_osm_result_with_string_coordinates_and_numeric_ids() {
        let json = r#"{
            "id": 1,
            "place_id": 308453112,
            "display_name": "10 Downing Street, London",
            "lat": "51.5034",
            "lon": "-0.1276",
            "source": "osm",
            "importance": 0.7
        }"#;
        let dto: CandidateDto = serde_json::from_str(json).unwrap();
        let candidate = Candidate::from(dto);

        assert_eq!(candidate.id, "1");
        assert_eq!(candidate.place_id, Some(PlaceId::new("308453112")));
        assert_eq!(
            candidate.coordinates,
            Some(Coordinates::new(51.5034, -0.1276))
        );
    }

    #[test]
    fn test_name_fills_in_for_missing_display_name() {
        let json = r#"{"name": "osm response", "place_id": 1, "id": 1, "source": "osm"}"#;
        let candidate = Candidate::from(serde_json::from_str::<CandidateDto>(json).unwrap());
        assert_eq!(candidate.display_name, "osm response");
        assert!(candidate.needs_details());
    }

    #[test]
    fn test_unparseable_coordinate_is_treated_as_missing() {
        let json = r#"{"display_name": "X", "lat": "north", "lon": 3.5}"#;
        let candidate = Candidate::from(serde_json::from_str::<CandidateDto>(json).unwrap());
        assert_eq!(candidate.coordinates, None);
        assert_eq!(candidate.id, "X");
    }

    #[test]
    fn test_error_envelope() {
        let body = r#"{"error": "Address search failed"}"#;
        let parsed: LookupResponse<Vec<CandidateDto>> = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed,
            LookupResponse::Failure {
                error: "Address search failed".to_string()
            }
        );

        let parsed: LookupResponse<Vec<CandidateDto>> = serde_json::from_str("[]").unwrap();
        assert_eq!(parsed, LookupResponse::Success(Vec::new()));
    }
}
