//! Data Transfer Objects (DTOs) for the address lookup endpoints.
//!
//! These types mirror the JSON the server returns and are private to the
//! infrastructure layer. They are deliberately lenient: the search endpoint
//! merges several providers, so identifiers may arrive as strings or numbers
//! and coordinates as numbers, numeric strings or `null`.
//!
//! ### Shapes
//! - search: `[{id, place_id, display_name, lat, lon, source}]`
//! - details: `{place_id, display_name, lat, lon, source}`
//! - failure (either endpoint): `{error}`

mod candidate;

pub use candidate::{CandidateDto, FlexibleId, FlexibleNumber, LookupResponse};
