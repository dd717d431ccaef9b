//! Per-device cache of not-yet-shown candidates, keyed by query signature.

pub mod keys;
pub mod store;
pub mod types;

pub use keys::{CacheKey, QuerySignature};
pub use store::{MemoryResultCache, ResultCache};
pub use types::CacheStats;
