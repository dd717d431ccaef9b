//! Cache types.

use kiosk_core::Candidate;
use serde::Serialize;
use std::time::Instant;

/// Remaining candidates for one (query, device) pair.
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry {
    pub candidates: Vec<Candidate>,
    pub stored_at: Instant,
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub replaces: u64,
    pub invalidations: u64,
    pub expired: u64,
    pub entries: usize,
}
