//! Address search gateway trait definition.

use async_trait::async_trait;

use crate::candidate::Candidate;
use crate::error::Result;
use crate::location::PlaceId;
use crate::session::SearchSession;

/// Service that turns address text into candidate locations.
#[async_trait]
pub trait AddressSearchGateway: Send + Sync {
    /// Searches for candidates matching `query`.
    ///
    /// # Arguments
    /// * `query` - Free text typed by the user
    /// * `session` - Token correlating this search with the eventual selection
    ///
    /// # Returns
    /// Candidates in provider order. An empty list means "no matches" and is
    /// not an error.
    async fn search(&self, query: &str, session: &SearchSession) -> Result<Vec<Candidate>>;

    /// Resolves a candidate that was returned without coordinates.
    ///
    /// The returned candidate always carries coordinates; passing the same
    /// session token completes the provider's billing session.
    async fn fetch_details(&self, place_id: &PlaceId, session: &SearchSession)
    -> Result<Candidate>;
}
