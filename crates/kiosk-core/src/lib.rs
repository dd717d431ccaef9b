//! Kiosk Core
//!
//! Core domain types, traits, and error handling for the kiosk asset
//! selection engine. This crate has minimal dependencies and defines the
//! shared vocabulary used across all other crates.

pub mod asset;
pub mod config;
pub mod context;
pub mod criteria;
pub mod error;
pub mod ids;
pub mod ports;

pub use asset::{AssetType, Candidate, ExifInfo, Person, PersonStatistics};
pub use config::{AspectRatioBounds, Orientation, SelectionConfig};
pub use context::RequestContext;
pub use criteria::{FilterCriteria, SearchRandomBody};
pub use error::{Error, Result};
pub use ids::*;
pub use ports::RemoteAssetSource;
