//! Asset selection engine for the kiosk.
//!
//! Picks the next image to display for a device: fetches candidate batches
//! from a [`RemoteAssetSource`](kiosk_core::RemoteAssetSource), filters them
//! for display suitability and keeps the unused remainder in a per-device
//! [`ResultCache`](kiosk_cache::ResultCache).

pub mod attribution;
pub mod filter;
pub mod selector;

pub use attribution::attribute_person;
pub use filter::{Rejection, SuitabilityFilter};
pub use selector::AssetSelector;
