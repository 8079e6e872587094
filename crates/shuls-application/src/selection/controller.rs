use shuls_core::{
    Candidate, Coordinates, FormFields, GeolocationError, Location, LocationHistory, MapViewport,
    PlaceId, Result, SearchResults, SearchSession, SelectionConfig, ShulsError,
};

use super::model::{
    ControllerState, DetailsRequest, SearchRequest, SelectionOutcome, SelectionSnapshot,
};

#[derive(Debug, Clone)]
struct InFlightSearch {
    seq: u64,
    /// `display_text` at the time the search was issued
    text: String,
}

#[derive(Debug, Clone)]
struct PendingDetails {
    seq: u64,
    place_id: PlaceId,
}

/// Single authority reconciling typed text, selected candidates and map moves
/// into one canonical location.
///
/// The controller performs no I/O. Operations that need the gateway return a
/// request carrying a sequence number; the host runs it and hands the result
/// back through the matching `complete_*` method, which discards anything that
/// has been superseded in the meantime.
///
/// `display_text` is the free-text buffer shown in the input. It may diverge
/// from the canonical selection while the user is typing.
#[derive(Debug)]
pub struct SelectionController {
    config: SelectionConfig,
    history: LocationHistory,
    display_text: String,
    is_valid: bool,
    is_locked: bool,
    results: SearchResults,
    error: Option<ShulsError>,
    session: SearchSession,
    next_seq: u64,
    in_flight_search: Option<InFlightSearch>,
    pending_details: Option<PendingDetails>,
    pending_geolocation: Option<u64>,
}

impl SelectionController {
    /// Creates a controller seeded with the previously saved address.
    ///
    /// A pre-validated, coordinate-bearing seed starts locked.
    pub fn new(seed: Location, is_valid: bool, config: SelectionConfig) -> Self {
        let is_locked = is_valid && seed.has_coordinates();
        Self {
            config,
            display_text: seed.display_name.clone(),
            history: LocationHistory::new(seed),
            is_valid,
            is_locked,
            results: SearchResults::NotSearched,
            error: None,
            session: SearchSession::new(),
            next_seq: 0,
            in_flight_search: None,
            pending_details: None,
            pending_geolocation: None,
        }
    }

    /// Builds the seed from raw form values: a known address starts at the
    /// selection zoom, an empty one shows the whole world.
    pub fn from_form(
        display_name: impl Into<String>,
        coordinates: Option<Coordinates>,
        place_id: Option<PlaceId>,
        is_valid: bool,
        config: SelectionConfig,
    ) -> Self {
        let coordinates = coordinates.unwrap_or(Coordinates::new(0.0, 0.0));
        let mut seed = Location::new(display_name, coordinates, place_id, config.blank_zoom);
        if seed.has_coordinates() {
            seed.zoom = config.selected_zoom;
        }
        Self::new(seed, is_valid, config)
    }

    // ============================================================================
    // Typed text
    // ============================================================================

    /// Updates the text buffer. History is untouched.
    ///
    /// Returns `false` when locked. The debounced search itself is started by
    /// the host through [`Self::begin_search`].
    pub fn on_text_input(&mut self, text: impl Into<String>) -> bool {
        if self.is_locked {
            tracing::debug!("Ignoring text input while locked");
            return false;
        }
        self.display_text = text.into();
        self.error = None;
        self.pending_details = None;
        self.pending_geolocation = None;
        if !self.query_is_searchable() {
            self.results = SearchResults::NotSearched;
        }
        true
    }

    /// Whether the current text is long enough to be sent to the gateway.
    pub fn query_is_searchable(&self) -> bool {
        self.display_text.trim().chars().count() >= self.config.min_query_length
    }

    /// Issues a search for the current text once the debounce window closes.
    pub fn begin_search(&mut self) -> Option<SearchRequest> {
        if self.is_locked || !self.query_is_searchable() {
            return None;
        }
        let seq = self.next_seq();
        self.in_flight_search = Some(InFlightSearch {
            seq,
            text: self.display_text.clone(),
        });
        tracing::debug!(seq, query = %self.display_text, "Issuing address search");
        Some(SearchRequest {
            seq,
            query: self.display_text.trim().to_string(),
            session: self.session.clone(),
        })
    }

    /// Applies a search response. Returns `false` if it was discarded as stale.
    pub fn complete_search(&mut self, seq: u64, result: Result<Vec<Candidate>>) -> bool {
        let in_flight = match self.in_flight_search.take() {
            Some(in_flight) if in_flight.seq == seq => in_flight,
            other => {
                self.in_flight_search = other;
                tracing::debug!(seq, "Discarding superseded search response");
                return false;
            }
        };
        if in_flight.text != self.display_text {
            tracing::debug!(seq, "Discarding search response for outdated text");
            return false;
        }

        match result {
            Ok(candidates) => {
                tracing::debug!(seq, count = candidates.len(), "Search completed");
                self.results = SearchResults::from_candidates(in_flight.text, candidates);
            }
            Err(err) => {
                let err = match err {
                    err @ ShulsError::SearchFailed { .. } => err,
                    other => ShulsError::search_failed(other.to_string()),
                };
                tracing::warn!(seq, "Address search failed: {}", err);
                self.results = SearchResults::Failed {
                    query: in_flight.text,
                    message: err.user_message(),
                };
                self.error = Some(err);
            }
        }
        true
    }

    // ============================================================================
    // Candidate selection
    // ============================================================================

    /// Selects a search candidate.
    ///
    /// Candidates with coordinates are committed immediately at the selection
    /// zoom. Others need a details lookup; history only changes once
    /// [`Self::complete_details`] succeeds.
    pub fn on_candidate_selected(&mut self, candidate: Candidate) -> SelectionOutcome {
        if self.is_locked {
            tracing::debug!("Ignoring candidate selection while locked");
            return SelectionOutcome::Ignored;
        }
        self.in_flight_search = None;
        self.pending_details = None;
        self.pending_geolocation = None;
        self.error = None;

        if let Some(location) = candidate.to_location(self.config.selected_zoom) {
            self.commit_selection(location);
            return SelectionOutcome::Committed;
        }

        let Some(place_id) = candidate.place_id else {
            tracing::warn!(
                "Candidate '{}' has neither coordinates nor a place id",
                candidate.display_name
            );
            self.error = Some(ShulsError::details_failed(
                candidate.id,
                "candidate has neither coordinates nor a place id",
            ));
            return SelectionOutcome::Rejected;
        };

        self.display_text = candidate.display_name;
        let seq = self.next_seq();
        self.pending_details = Some(PendingDetails {
            seq,
            place_id: place_id.clone(),
        });
        SelectionOutcome::NeedsDetails(DetailsRequest {
            seq,
            place_id,
            session: self.session.clone(),
        })
    }

    /// Applies a details response. Returns `false` if it was discarded as stale.
    ///
    /// On failure the error is surfaced and history is left unchanged.
    pub fn complete_details(&mut self, seq: u64, result: Result<Candidate>) -> bool {
        let pending = match self.pending_details.take() {
            Some(pending) if pending.seq == seq => pending,
            other => {
                self.pending_details = other;
                tracing::debug!(seq, "Discarding superseded details response");
                return false;
            }
        };

        let resolved = result.and_then(|candidate| {
            let place_id = candidate.place_id.clone().unwrap_or(pending.place_id.clone());
            candidate
                .to_location(self.config.selected_zoom)
                .map(|location| Location {
                    place_id: Some(place_id),
                    ..location
                })
                .ok_or_else(|| {
                    ShulsError::details_failed(
                        pending.place_id.as_str(),
                        "details response has no coordinates",
                    )
                })
        });

        match resolved {
            Ok(location) => self.commit_selection(location),
            Err(err) => {
                let err = match err {
                    err @ ShulsError::DetailsLookupFailed { .. } => err,
                    other => ShulsError::details_failed(pending.place_id.as_str(), other.to_string()),
                };
                tracing::warn!(seq, "Details lookup failed: {}", err);
                self.error = Some(err);
            }
        }
        true
    }

    // ============================================================================
    // Map movement
    // ============================================================================

    /// Reconciles a finished map drag or zoom with the current location.
    ///
    /// A center change beyond the rounding epsilon drops a pin at the new
    /// center. A zoom-only change keeps the current address. Returns `true`
    /// when a history entry was recorded.
    pub fn on_map_moved(&mut self, center: Coordinates, zoom: u8) -> bool {
        if self.is_locked {
            tracing::debug!("Ignoring map move while locked");
            return false;
        }
        let current = self.history.current();
        let precision = self.config.coordinate_precision;

        if !center.rounded_eq(&current.coordinates(), precision) {
            let pin = Location::dropped_pin(center, zoom);
            tracing::debug!("Map moved to {}", pin.display_name);
            self.display_text = pin.display_name.clone();
            self.history.record_new_location(pin);
            self.after_manual_change();
            true
        } else if zoom != current.zoom {
            let zoomed = current.with_zoom(zoom);
            self.history.record_new_location(zoomed);
            true
        } else {
            false
        }
    }

    /// Pushes the canonical selection to the map if the map shows something
    /// else. Returns `true` if the view was changed.
    pub fn sync_viewport(&self, viewport: &mut dyn MapViewport) -> bool {
        let current = self.history.current();
        let same_center = viewport
            .center()
            .rounded_eq(&current.coordinates(), self.config.coordinate_precision);
        if same_center && viewport.zoom() == current.zoom {
            return false;
        }
        viewport.set_view(current.coordinates(), current.zoom);
        true
    }

    // ============================================================================
    // History
    // ============================================================================

    pub fn go_back(&mut self) -> bool {
        if self.is_locked || !self.history.go_back() {
            return false;
        }
        self.after_navigation();
        true
    }

    pub fn go_forward(&mut self) -> bool {
        if self.is_locked || !self.history.go_forward() {
            return false;
        }
        self.after_navigation();
        true
    }

    /// Restores the seed entry. The validation flag is kept.
    pub fn reset_to_initial(&mut self) {
        self.history.reset_to_seed();
        self.display_text = self.history.seed().display_name.clone();
        self.results = SearchResults::NotSearched;
        self.error = None;
        self.in_flight_search = None;
        self.pending_details = None;
        self.pending_geolocation = None;
    }

    // ============================================================================
    // Lock, validation and geolocation
    // ============================================================================

    /// Flips the lock. Entering the lock abandons in-flight requests.
    pub fn toggle_lock(&mut self) -> bool {
        self.is_locked = !self.is_locked;
        if self.is_locked {
            self.in_flight_search = None;
            self.pending_details = None;
            self.pending_geolocation = None;
            self.results = SearchResults::NotSearched;
        }
        self.is_locked
    }

    /// Records the outcome of the last server-side validation.
    pub fn set_valid(&mut self, is_valid: bool) {
        self.is_valid = is_valid;
    }

    /// Starts a "use my current location" request. Returns its sequence id,
    /// or `None` when locked.
    pub fn begin_geolocation(&mut self) -> Option<u64> {
        if self.is_locked {
            return None;
        }
        let seq = self.next_seq();
        self.pending_geolocation = Some(seq);
        Some(seq)
    }

    /// Applies a geolocation result. A position becomes a dropped pin at the
    /// selection zoom; a failure only surfaces its message.
    pub fn complete_geolocation(
        &mut self,
        seq: u64,
        result: std::result::Result<Coordinates, GeolocationError>,
    ) -> bool {
        if self.pending_geolocation != Some(seq) {
            tracing::debug!(seq, "Discarding superseded geolocation result");
            return false;
        }
        self.pending_geolocation = None;

        match result {
            Ok(position) => {
                let pin = Location::dropped_pin(position, self.config.selected_zoom);
                self.display_text = pin.display_name.clone();
                self.history.record_new_location(pin);
                self.after_manual_change();
            }
            Err(err) => {
                tracing::warn!("Geolocation failed: {}", err);
                self.error = Some(err.into());
            }
        }
        true
    }

    // ============================================================================
    // Read access
    // ============================================================================

    pub fn state(&self) -> ControllerState {
        if self.is_locked {
            ControllerState::Locked
        } else if self.pending_details.is_some() {
            ControllerState::AwaitingDetails
        } else if self.in_flight_search.is_some() {
            ControllerState::Searching
        } else {
            ControllerState::Idle
        }
    }

    /// The canonical selection.
    pub fn current(&self) -> &Location {
        self.history.current()
    }

    pub fn history(&self) -> &LocationHistory {
        &self.history
    }

    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    pub fn results(&self) -> &SearchResults {
        &self.results
    }

    pub fn error(&self) -> Option<&ShulsError> {
        self.error.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Values for the `latitude`, `longitude` and `place_id` form inputs.
    pub fn form_fields(&self) -> FormFields {
        FormFields::from(self.history.current())
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            current: self.history.current().clone(),
            display_text: self.display_text.clone(),
            state: self.state(),
            results: self.results.clone(),
            error: self.error.as_ref().map(|e| e.user_message()),
            is_valid: self.is_valid,
            is_locked: self.is_locked,
            can_go_back: self.history.can_go_back(),
            can_go_forward: self.history.can_go_forward(),
        }
    }

    // ============================================================================
    // Internals
    // ============================================================================

    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn commit_selection(&mut self, location: Location) {
        tracing::info!(
            place_id = ?location.place_id,
            "Selected '{}' ({}, {})",
            location.display_name,
            location.latitude,
            location.longitude
        );
        self.display_text = location.display_name.clone();
        self.history.record_new_location(location);
        self.results = SearchResults::NotSearched;
        self.error = None;
        self.session.rotate();
    }

    /// A manual pin (drag or geolocation) supersedes any request in progress.
    fn after_manual_change(&mut self) {
        self.results = SearchResults::NotSearched;
        self.error = None;
        self.in_flight_search = None;
        self.pending_details = None;
        self.pending_geolocation = None;
    }

    fn after_navigation(&mut self) {
        self.display_text = self.history.current().display_name.clone();
        self.results = SearchResults::NotSearched;
        self.error = None;
        self.in_flight_search = None;
        self.pending_details = None;
        self.pending_geolocation = None;
    }
}
