//! HTTP adapter implementing [`RemoteAssetSource`](kiosk_core::RemoteAssetSource)
//! against the Immich REST API.

pub mod client;
pub mod config;

pub use client::ImmichClient;
pub use config::ServerConfig;
