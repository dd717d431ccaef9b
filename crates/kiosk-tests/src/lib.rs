//! Integration test infrastructure for the kiosk engine.
//!
//! Spins up a mocked photo server with `wiremock` and wires the real HTTP
//! adapter, cache and selector against it.
//!
//! # Usage
//!
//! ```ignore
//! use kiosk_tests::TestContext;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let ctx = TestContext::new().await;
//!     // Mount mocks on ctx.server, select through ctx.selector.
//! }
//! ```

pub mod context;
pub mod fixtures;

pub use context::{SEARCH_PATH, TestContext};
pub use fixtures::*;

/// Initialize test logging (call once per test binary).
pub fn init_test_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,kiosk_engine=debug")),
        )
        .with_test_writer()
        .try_init();
}
