//! Application layer for the shul directory.
//!
//! This crate wires the domain types from `shuls-core` into the location
//! selection workflow: a synchronous controller plus the async service that
//! debounces input and calls the address search gateway.

pub mod selection;

pub use selection::{
    AddressInputHandle, AddressInputService, ControllerState, SelectionController,
    SelectionEvent, SelectionOutcome, SelectionSnapshot,
};
