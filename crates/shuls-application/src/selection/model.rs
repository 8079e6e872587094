//! Selection controller models: states, outbound requests and UI snapshots.

use serde::{Deserialize, Serialize};
use shuls_core::{Location, PlaceId, SearchResults, SearchSession};

/// Activity of the selection controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerState {
    Idle,
    /// A candidate search is in flight
    Searching,
    /// A selected candidate is being resolved to coordinates
    AwaitingDetails,
    /// A confirmed address exists and editing is disabled
    Locked,
}

/// A candidate search the host must run against the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Monotonic id; responses for older ids are discarded
    pub seq: u64,
    pub query: String,
    pub session: SearchSession,
}

/// A details lookup the host must run against the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsRequest {
    pub seq: u64,
    pub place_id: PlaceId,
    pub session: SearchSession,
}

/// Result of selecting a candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    /// The candidate had coordinates and is now the current location
    Committed,
    /// Coordinates must be fetched first; history is untouched until then
    NeedsDetails(DetailsRequest),
    /// The candidate can be neither committed nor resolved
    Rejected,
    /// The controller is locked
    Ignored,
}

/// Everything a view needs to render the address input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    pub current: Location,
    pub display_text: String,
    pub state: ControllerState,
    pub results: SearchResults,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub is_valid: bool,
    pub is_locked: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}
