//! Test context wiring the real adapter against a mock server.

use kiosk_cache::MemoryResultCache;
use kiosk_core::RequestContext;
use kiosk_engine::AssetSelector;
use kiosk_immich::{ImmichClient, ServerConfig};
use serde_json::Value;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-api-key";
pub const SEARCH_PATH: &str = "/api/search/random";

/// Mock photo server plus a selector talking to it.
pub struct TestContext {
    pub server: MockServer,
    pub cache: Arc<MemoryResultCache>,
    pub selector: Arc<AssetSelector>,
}

impl TestContext {
    pub async fn new() -> Self {
        crate::init_test_logging();

        let server = MockServer::start().await;
        let client = ImmichClient::new(&ServerConfig::new(server.uri(), TEST_API_KEY))
            .expect("mock server uri is a valid url");
        let cache = Arc::new(MemoryResultCache::new());
        let selector = Arc::new(AssetSelector::new(Arc::new(client), cache.clone()));

        Self {
            server,
            cache,
            selector,
        }
    }

    /// Answer every random search with `assets`, at most `times` times.
    pub async fn mount_search(&self, assets: Vec<Value>, times: u64) {
        Mock::given(method("POST"))
            .and(path(SEARCH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(assets)))
            .up_to_n_times(times)
            .mount(&self.server)
            .await;
    }

    /// Number of random search requests the server has received.
    pub async fn search_requests(&self) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == SEARCH_PATH)
            .count()
    }

    pub fn request(&self, device: &str) -> RequestContext {
        RequestContext::for_device(device)
    }
}
