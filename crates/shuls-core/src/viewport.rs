//! Map viewport collaborator.

use serde::{Deserialize, Serialize};

use crate::location::Coordinates;

/// What ended a map movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    DragEnd,
    ZoomEnd,
}

/// Notification emitted by the map once the user stops moving it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportChange {
    pub center: Coordinates,
    pub zoom: u8,
    pub kind: MoveKind,
}

/// An interactive map owning pan and zoom.
///
/// Rendering, tiles and clustering live behind this trait.
pub trait MapViewport {
    fn center(&self) -> Coordinates;

    fn zoom(&self) -> u8;

    /// Moves the map without the move being reported back as user intent.
    fn set_view(&mut self, center: Coordinates, zoom: u8);

    /// Current view as a change notification.
    fn snapshot(&self, kind: MoveKind) -> ViewportChange {
        ViewportChange {
            center: self.center(),
            zoom: self.zoom(),
            kind,
        }
    }
}
