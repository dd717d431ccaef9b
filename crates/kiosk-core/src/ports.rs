//! Port traits (hexagonal architecture).
//!
//! These traits define the interfaces between the selection engine and
//! external adapters.

use crate::asset::Candidate;
use crate::context::RequestContext;
use crate::criteria::FilterCriteria;
use crate::ids::PersonId;
use crate::Result;
use async_trait::async_trait;

/// Remote source of candidate assets.
///
/// Implementations issue one network request per call and enforce their own
/// timeout. An empty result is `Ok(vec![])`; transport and decode failures are
/// reported as `Error::Transport` / `Error::Decode`.
#[async_trait]
pub trait RemoteAssetSource: Send + Sync {
    /// Fetch a batch of random candidates matching `criteria`.
    async fn fetch(
        &self,
        criteria: &FilterCriteria,
        ctx: &RequestContext,
    ) -> Result<Vec<Candidate>>;

    /// Total number of assets associated with a person.
    async fn person_statistics(&self, person: &PersonId, ctx: &RequestContext) -> Result<u64>;
}
