//! Async driver for [`SelectionController`].
//!
//! The service owns the controller on a single task. UI events arrive on an
//! mpsc channel, gateway calls run on spawned tasks and report back through an
//! internal channel, and every step publishes a fresh snapshot on a watch
//! channel. Typed text is debounced before it reaches the gateway.

use std::sync::Arc;

use shuls_core::{
    AddressSearchGateway, Candidate, Coordinates, FormMirror, FormSink, GeolocationError,
    Geolocator, Result, ShulsError, ViewportChange,
};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until, timeout};

use super::controller::SelectionController;
use super::model::{DetailsRequest, SearchRequest, SelectionOutcome, SelectionSnapshot};

const EVENT_BUFFER: usize = 64;

/// User interaction reported by the view.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    /// The address input changed
    TextInput(String),
    /// A dropdown entry was picked
    CandidateSelected(Candidate),
    /// The map finished a drag or zoom
    MapMoved(ViewportChange),
    GoBack,
    GoForward,
    /// Restore the address the form was loaded with
    Reset,
    ToggleLock,
    /// Result of server-side validation of the saved address
    SetValid(bool),
    UseCurrentLocation,
}

/// Result of a spawned collaborator call, tagged with the request sequence.
#[derive(Debug)]
enum Completion {
    Search {
        seq: u64,
        result: Result<Vec<Candidate>>,
    },
    Details {
        seq: u64,
        result: Result<Candidate>,
    },
    Geolocation {
        seq: u64,
        result: std::result::Result<Coordinates, GeolocationError>,
    },
}

/// Event loop around a [`SelectionController`].
pub struct AddressInputService {
    controller: SelectionController,
    gateway: Arc<dyn AddressSearchGateway>,
    geolocator: Option<Arc<dyn Geolocator>>,
    form: Option<Box<dyn FormSink>>,
    mirror: FormMirror,
}

impl AddressInputService {
    pub fn new(controller: SelectionController, gateway: Arc<dyn AddressSearchGateway>) -> Self {
        // The form already holds the seed values; only later changes are dispatched.
        let mirror = FormMirror::with_initial(controller.form_fields());
        Self {
            controller,
            gateway,
            geolocator: None,
            form: None,
            mirror,
        }
    }

    pub fn with_geolocator(mut self, geolocator: Arc<dyn Geolocator>) -> Self {
        self.geolocator = Some(geolocator);
        self
    }

    /// Mirrors the canonical selection into hidden form inputs.
    pub fn with_form_sink(mut self, sink: Box<dyn FormSink>) -> Self {
        self.form = Some(sink);
        self
    }

    /// Starts the event loop on the current tokio runtime.
    pub fn spawn(self) -> AddressInputHandle {
        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        let (snapshot_tx, snapshot_rx) = watch::channel(self.controller.snapshot());
        let task = tokio::spawn(self.run(event_rx, snapshot_tx));
        AddressInputHandle {
            events: event_tx,
            snapshots: snapshot_rx,
            task,
        }
    }

    async fn run(
        mut self,
        mut events: mpsc::Receiver<SelectionEvent>,
        snapshots: watch::Sender<SelectionSnapshot>,
    ) -> SelectionController {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel();
        let mut search_deadline: Option<Instant> = None;

        tracing::debug!("Address input service started");
        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else {
                        break;
                    };
                    search_deadline = self.handle_event(event, search_deadline, &done_tx);
                }
                Some(completion) = done_rx.recv() => {
                    self.handle_completion(completion);
                }
                _ = wait_for(search_deadline) => {
                    search_deadline = None;
                    if let Some(request) = self.controller.begin_search() {
                        self.spawn_search(request, &done_tx);
                    }
                }
            }
            self.publish(&snapshots);
        }
        tracing::debug!("Address input service stopped");
        self.controller
    }

    /// Applies one event and returns the new debounce deadline.
    fn handle_event(
        &mut self,
        event: SelectionEvent,
        search_deadline: Option<Instant>,
        done: &mpsc::UnboundedSender<Completion>,
    ) -> Option<Instant> {
        let text_before = self.controller.display_text().to_string();

        match event {
            SelectionEvent::TextInput(text) => {
                if !self.controller.on_text_input(text) {
                    return search_deadline;
                }
                return self
                    .controller
                    .query_is_searchable()
                    .then(|| Instant::now() + self.controller.config().debounce());
            }
            SelectionEvent::CandidateSelected(candidate) => {
                match self.controller.on_candidate_selected(candidate) {
                    SelectionOutcome::NeedsDetails(request) => self.spawn_details(request, done),
                    SelectionOutcome::Committed
                    | SelectionOutcome::Rejected
                    | SelectionOutcome::Ignored => {}
                }
                return None;
            }
            SelectionEvent::MapMoved(change) => {
                self.controller.on_map_moved(change.center, change.zoom);
            }
            SelectionEvent::GoBack => {
                self.controller.go_back();
            }
            SelectionEvent::GoForward => {
                self.controller.go_forward();
            }
            SelectionEvent::Reset => {
                self.controller.reset_to_initial();
                return None;
            }
            SelectionEvent::ToggleLock => {
                if self.controller.toggle_lock() {
                    return None;
                }
            }
            SelectionEvent::SetValid(is_valid) => {
                self.controller.set_valid(is_valid);
            }
            SelectionEvent::UseCurrentLocation => {
                if let Some(seq) = self.controller.begin_geolocation() {
                    self.spawn_geolocation(seq, done);
                }
            }
        }

        // Anything that replaced the typed text also cancels its pending search.
        if self.controller.display_text() != text_before {
            None
        } else {
            search_deadline
        }
    }

    fn handle_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Search { seq, result } => {
                self.controller.complete_search(seq, result);
            }
            Completion::Details { seq, result } => {
                self.controller.complete_details(seq, result);
            }
            Completion::Geolocation { seq, result } => {
                self.controller.complete_geolocation(seq, result);
            }
        }
    }

    fn spawn_search(&self, request: SearchRequest, done: &mpsc::UnboundedSender<Completion>) {
        let gateway = Arc::clone(&self.gateway);
        let done = done.clone();
        let limit = self.controller.config().request_timeout();

        tokio::spawn(async move {
            let search = gateway.search(&request.query, &request.session);
            let result = match timeout(limit, search).await {
                Ok(result) => result,
                Err(_) => Err(ShulsError::search_failed("request timed out")),
            };
            let _ = done.send(Completion::Search {
                seq: request.seq,
                result,
            });
        });
    }

    fn spawn_details(&self, request: DetailsRequest, done: &mpsc::UnboundedSender<Completion>) {
        let gateway = Arc::clone(&self.gateway);
        let done = done.clone();
        let limit = self.controller.config().request_timeout();

        tokio::spawn(async move {
            let lookup = gateway.fetch_details(&request.place_id, &request.session);
            let result = match timeout(limit, lookup).await {
                Ok(result) => result,
                Err(_) => Err(ShulsError::details_failed(
                    request.place_id.as_str(),
                    "request timed out",
                )),
            };
            let _ = done.send(Completion::Details {
                seq: request.seq,
                result,
            });
        });
    }

    fn spawn_geolocation(&self, seq: u64, done: &mpsc::UnboundedSender<Completion>) {
        let Some(geolocator) = self.geolocator.clone() else {
            tracing::debug!("No geolocator configured");
            let _ = done.send(Completion::Geolocation {
                seq,
                result: Err(GeolocationError::PositionUnavailable),
            });
            return;
        };
        let done = done.clone();
        let limit = self.controller.config().request_timeout();

        tokio::spawn(async move {
            let result = match timeout(limit, geolocator.current_position()).await {
                Ok(result) => result,
                Err(_) => Err(GeolocationError::Timeout),
            };
            let _ = done.send(Completion::Geolocation { seq, result });
        });
    }

    fn publish(&mut self, snapshots: &watch::Sender<SelectionSnapshot>) {
        let snapshot = self.controller.snapshot();
        snapshots.send_if_modified(|published| {
            if *published == snapshot {
                return false;
            }
            *published = snapshot;
            true
        });

        if let Some(sink) = self.form.as_mut() {
            let changed = self.mirror.sync(&self.controller.form_fields(), sink.as_mut());
            if !changed.is_empty() {
                tracing::debug!(?changed, "Form inputs updated");
            }
        }
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Client side of a running [`AddressInputService`].
pub struct AddressInputHandle {
    events: mpsc::Sender<SelectionEvent>,
    snapshots: watch::Receiver<SelectionSnapshot>,
    task: JoinHandle<SelectionController>,
}

impl AddressInputHandle {
    pub async fn send(&self, event: SelectionEvent) -> Result<()> {
        self.events
            .send(event)
            .await
            .map_err(|_| ShulsError::internal("address input service has stopped"))
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> SelectionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Waits for the next published snapshot.
    pub async fn changed(&mut self) -> Result<SelectionSnapshot> {
        self.snapshots
            .changed()
            .await
            .map_err(|_| ShulsError::internal("address input service has stopped"))?;
        Ok(self.snapshots.borrow_and_update().clone())
    }

    /// A receiver for views that render independently of the handle.
    pub fn subscribe(&self) -> watch::Receiver<SelectionSnapshot> {
        self.snapshots.clone()
    }

    /// Stops the event loop and returns the controller in its final state.
    pub async fn shutdown(self) -> Result<SelectionController> {
        let Self { events, task, .. } = self;
        drop(events);
        task.await
            .map_err(|e| ShulsError::internal(format!("address input task failed: {}", e)))
    }
}
