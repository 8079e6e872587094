//! Location selection module.
//!
//! This module contains the state machine that keeps the address input, the
//! candidate dropdown and the map pin in agreement, and the async service that
//! drives it from UI events.
//!
//! # Module Structure
//!
//! - `model`: Controller states, outbound requests and UI snapshots
//! - `controller`: The synchronous state machine (`SelectionController`)
//! - `service`: Debouncing event loop around the controller (`AddressInputService`)
//!
//! # Usage
//!
//! ```ignore
//! use shuls_application::selection::{AddressInputService, SelectionController, SelectionEvent};
//!
//! let controller = SelectionController::from_form(name, coords, place_id, is_valid, config);
//! let handle = AddressInputService::new(controller, gateway).spawn();
//! handle.send(SelectionEvent::TextInput("Young Israel, Teaneck".into())).await?;
//! ```

mod controller;
mod model;
mod service;


// Re-export public API
pub use controller::SelectionController;
pub use model::{
    ControllerState, DetailsRequest, SearchRequest, SelectionOutcome, SelectionSnapshot,
};
pub use service::{AddressInputHandle, AddressInputService, SelectionEvent};
