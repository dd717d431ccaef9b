//! Cache key generation utilities.

use kiosk_core::{DeviceId, FilterCriteria};
use serde_json::json;
use sha2::{Digest, Sha256};
use std::fmt;

/// Deterministic SHA-256 token for a [`FilterCriteria`].
///
/// Also embedded in the search URL so transport caches treat logically
/// identical queries as one resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuerySignature(String);

impl QuerySignature {
    /// Every optional field is reduced to its zero value before hashing.
    /// The key set is fixed, so equal criteria always encode to equal text.
    pub fn of(criteria: &FilterCriteria) -> Self {
        let person_ids: Vec<&str> = criteria
            .person_id()
            .map(|p| p.as_str())
            .filter(|p| !p.is_empty())
            .into_iter()
            .collect();
        let canonical = json!({
            "personIds": person_ids,
            "type": criteria.asset_type().as_str(),
            "withArchived": criteria.include_archived(),
            "withExif": criteria.includes_exif(),
            "withPeople": criteria.includes_people(),
            "size": criteria.size(),
        });

        let digest = Sha256::digest(canonical.to_string().as_bytes());
        Self(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuerySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cache slot for one logical query on one device.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub signature: QuerySignature,
    pub device: DeviceId,
}

impl CacheKey {
    pub fn new(signature: QuerySignature, device: DeviceId) -> Self {
        Self { signature, device }
    }

    pub fn for_query(criteria: &FilterCriteria, device: &DeviceId) -> Self {
        Self::new(QuerySignature::of(criteria), device.clone())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.signature, self.device)
    }
}
