//! Domain layer for the shul directory's location selection.
//!
//! Pure data types, collaborator traits and small helpers. Nothing in this
//! crate performs I/O; gateways, maps and forms are injected by the host.

pub mod candidate;
pub mod config;
pub mod error;
pub mod form;
pub mod gateway;
pub mod geolocation;
pub mod history;
pub mod listing;
pub mod location;
pub mod math;
pub mod session;
pub mod text;
pub mod viewport;

pub use candidate::{Candidate, CandidateSource, SearchResults};
pub use config::{ClientConfig, SelectionConfig};
pub use error::{Result, ShulsError};
pub use form::{FormFields, FormMirror, FormSink};
pub use gateway::AddressSearchGateway;
pub use geolocation::{GeolocationError, Geolocator};
pub use history::LocationHistory;
pub use listing::{Listing, ListingFeed};
pub use location::{Coordinates, Location, PlaceId};
pub use session::SearchSession;
pub use viewport::{MapViewport, MoveKind, ViewportChange};
