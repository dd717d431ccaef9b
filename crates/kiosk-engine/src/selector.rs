//! Selection loop: fetch or serve from cache, filter, pick, write back.

use crate::attribution::attribute_person;
use crate::filter::SuitabilityFilter;
use kiosk_cache::{CacheKey, ResultCache};
use kiosk_core::{
    Candidate, Error, FilterCriteria, PersonId, RemoteAssetSource, RequestContext, Result,
    SelectionConfig,
};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

/// Picks the next asset for a device.
pub struct AssetSelector {
    source: Arc<dyn RemoteAssetSource>,
    cache: Arc<dyn ResultCache>,
}

impl AssetSelector {
    pub fn new(source: Arc<dyn RemoteAssetSource>, cache: Arc<dyn ResultCache>) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &Arc<dyn ResultCache> {
        &self.cache
    }

    /// Select a random image, optionally one showing `person`.
    pub async fn next_asset(
        &self,
        ctx: &RequestContext,
        config: &SelectionConfig,
        person: Option<&PersonId>,
    ) -> Result<Candidate> {
        let criteria = FilterCriteria::from_config(config, person.cloned());
        self.select(ctx, config, &criteria).await
    }

    /// Run the bounded selection loop for `criteria`.
    ///
    /// Each attempt first tries the device's cached batch. An empty or fully
    /// rejected cached batch is invalidated and the same attempt falls through
    /// to a fetch, so `config.max_retries` bounds the number of fetches.
    /// Transport and decode failures abort immediately. After
    /// `config.max_retries` unusable fetched batches the call fails with
    /// [`Error::NoSuitableAsset`].
    pub async fn select(
        &self,
        ctx: &RequestContext,
        config: &SelectionConfig,
        criteria: &FilterCriteria,
    ) -> Result<Candidate> {
        config.validate()?;

        let key = CacheKey::for_query(criteria, &ctx.device_id);
        let filter = SuitabilityFilter::new(config);
        let query = criteria.describe();

        debug!(
            request_id = %ctx.request_id,
            device_id = %ctx.device_id,
            prefetch = ctx.prefetch,
            query = %query,
            "Selecting asset"
        );

        for attempt in 0..config.max_retries {
            if let Some(cached) = self.cached_batch(&key, config) {
                trace!(attempt, cache_key = %key, remaining = cached.len(), "Serving from cache");
                if let Some(selected) = self.take_suitable(&key, config, &filter, cached)? {
                    return Ok(self.finish(ctx, criteria, selected, attempt));
                }
                debug!(
                    request_id = %ctx.request_id,
                    attempt,
                    "No viable images left in cache. Refreshing"
                );
                self.cache.invalidate(&key);
            }

            let batch = self.source.fetch(criteria, ctx).await.inspect_err(|e| {
                warn!(
                    request_id = %ctx.request_id,
                    cache_key = %key,
                    query = %query,
                    error = %e,
                    "Fetching assets failed"
                );
            })?;

            let batch_size = batch.len();
            if let Some(selected) = self.take_suitable(&key, config, &filter, batch)? {
                return Ok(self.finish(ctx, criteria, selected, attempt));
            }
            debug!(
                request_id = %ctx.request_id,
                attempt,
                batch_size,
                "No viable images in fetched batch. Trying again"
            );
            self.cache.invalidate(&key);
        }

        warn!(
            request_id = %ctx.request_id,
            device_id = %ctx.device_id,
            query = %query,
            max_retries = config.max_retries,
            "No suitable image found"
        );
        Err(Error::NoSuitableAsset { query })
    }

    /// Take the first suitable candidate of `batch` and write the rest back.
    ///
    /// Returns `None` when nothing in the batch fits. A batch drained by the
    /// selection removes the cache entry instead of storing it empty.
    fn take_suitable(
        &self,
        key: &CacheKey,
        config: &SelectionConfig,
        filter: &SuitabilityFilter,
        batch: Vec<Candidate>,
    ) -> Result<Option<Candidate>> {
        let Some(index) = batch.iter().position(|candidate| {
            filter
                .check(candidate)
                .inspect_err(|reason| trace!(asset_id = %candidate.id, %reason, "Rejected asset"))
                .is_ok()
        }) else {
            return Ok(None);
        };

        let (selected, remaining) = split_at_selection(batch, index).ok_or_else(|| {
            Error::Internal(format!("selection index {} out of bounds", index))
        })?;

        if config.cache_enabled {
            if remaining.is_empty() {
                self.cache.invalidate(key);
            } else {
                self.cache.replace(key, remaining);
            }
        }
        Ok(Some(selected))
    }

    fn finish(
        &self,
        ctx: &RequestContext,
        criteria: &FilterCriteria,
        mut selected: Candidate,
        attempt: u32,
    ) -> Candidate {
        if let Some(person) = criteria.person_id() {
            attribute_person(&mut selected, person);
        }

        info!(
            request_id = %ctx.request_id,
            device_id = %ctx.device_id,
            prefetch = ctx.prefetch,
            asset_id = %selected.id,
            attempt,
            "Selected asset"
        );
        selected
    }

    /// Select on a background task, marking the request as a prefetch.
    ///
    /// The cache is written only after a completed fetch and scan, so
    /// aborting the task never leaves a partially consumed batch behind.
    pub fn spawn_prefetch(
        self: &Arc<Self>,
        ctx: RequestContext,
        config: SelectionConfig,
        criteria: FilterCriteria,
    ) -> JoinHandle<Result<Candidate>> {
        let selector = Arc::clone(self);
        let ctx = ctx.as_prefetch();
        tokio::spawn(async move { selector.select(&ctx, &config, &criteria).await })
    }

    /// Number of assets the server associates with `person`.
    pub async fn person_asset_count(
        &self,
        ctx: &RequestContext,
        person: &PersonId,
    ) -> Result<u64> {
        let count = self.source.person_statistics(person, ctx).await?;
        debug!(request_id = %ctx.request_id, person_id = %person, count, "Fetched person statistics");
        Ok(count)
    }

    fn cached_batch(&self, key: &CacheKey, config: &SelectionConfig) -> Option<Vec<Candidate>> {
        if config.cache_enabled {
            self.cache.get(key)
        } else {
            None
        }
    }
}

/// Take the candidate at `index`, keeping the others in their original order.
fn split_at_selection(batch: Vec<Candidate>, index: usize) -> Option<(Candidate, Vec<Candidate>)> {
    let mut selected = None;
    let mut remaining = Vec::with_capacity(batch.len().saturating_sub(1));
    for (i, candidate) in batch.into_iter().enumerate() {
        if i == index {
            selected = Some(candidate);
        } else {
            remaining.push(candidate);
        }
    }
    selected.map(|selected| (selected, remaining))
}
