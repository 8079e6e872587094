//! Listing dataset shared between the data loader and map renderers.
//!
//! Renderers register with a [`ListingFeed`] instead of listening for ambient
//! page events; the loader publishes each freshly loaded dataset to them.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::location::Coordinates;

/// A shul shown on the map. Opaque beyond its position and label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: u64,
    pub name: String,
    pub coordinates: Coordinates,
}

/// Handle returned by [`ListingFeed::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type ListingObserver = Box<dyn Fn(&Arc<Vec<Listing>>) + Send + Sync>;

/// Publish/subscribe hub for the listing dataset.
#[derive(Default)]
pub struct ListingFeed {
    observers: Vec<(SubscriptionId, ListingObserver)>,
    latest: Option<Arc<Vec<Listing>>>,
    next_id: u64,
}

impl ListingFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `observer`. If a dataset was already published it is delivered
    /// immediately, so late subscribers do not miss the initial load.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: Fn(&Arc<Vec<Listing>>) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        if let Some(latest) = &self.latest {
            observer(latest);
        }
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Replaces the dataset and notifies every observer.
    pub fn publish(&mut self, listings: Vec<Listing>) {
        let listings = Arc::new(listings);
        tracing::debug!(
            "Publishing {} listings to {} observers",
            listings.len(),
            self.observers.len()
        );
        for (_, observer) in &self.observers {
            observer(&listings);
        }
        self.latest = Some(listings);
    }

    pub fn latest(&self) -> Option<Arc<Vec<Listing>>> {
        self.latest.clone()
    }
}
