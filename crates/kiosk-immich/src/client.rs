//! Immich REST client.

use crate::config::ServerConfig;
use async_trait::async_trait;
use kiosk_cache::QuerySignature;
use kiosk_core::{
    Candidate, Error, FilterCriteria, PersonId, PersonStatistics, RemoteAssetSource,
    RequestContext, Result,
};
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

const API_KEY_HEADER: &str = "x-api-key";
const MAX_ERROR_BODY: usize = 256;

/// [`RemoteAssetSource`] backed by an Immich server.
#[derive(Debug, Clone)]
pub struct ImmichClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl ImmichClient {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let base_url = config.base_url()?;
        let client = Client::builder()
            .timeout(config.timeout()?)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the random search endpoint, tagged with the query signature.
    pub fn search_url(&self, criteria: &FilterCriteria) -> Url {
        let mut url = self.endpoint(&["api", "search", "random"]);
        url.query_pairs_mut()
            .append_pair("kiosk", QuerySignature::of(criteria).as_str());
        url
    }

    pub fn person_statistics_url(&self, person: &PersonId) -> Url {
        self.endpoint(&["api", "people", person.as_str(), "statistics"])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.clear().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: &Url) -> RequestBuilder {
        self.client
            .request(method, url.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, "application/json")
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, url: &Url) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::transport(url.as_str(), e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(url.as_str(), e))?;

        if !status.is_success() {
            return Err(Error::transport(
                url.as_str(),
                format!("server returned {}: {}", status, truncate(&body)),
            ));
        }

        serde_json::from_str(&body).map_err(|e| Error::decode(url.as_str(), e))
    }
}

#[async_trait]
impl RemoteAssetSource for ImmichClient {
    async fn fetch(
        &self,
        criteria: &FilterCriteria,
        ctx: &RequestContext,
    ) -> Result<Vec<Candidate>> {
        let url = self.search_url(criteria);
        debug!(
            request_id = %ctx.request_id,
            device_id = %ctx.device_id,
            prefetch = ctx.prefetch,
            url = %url,
            "Requesting random assets"
        );

        let request = self
            .request(Method::POST, &url)
            .json(&criteria.search_body());
        let assets: Vec<Candidate> = self.send(request, &url).await?;

        debug!(request_id = %ctx.request_id, count = assets.len(), "Received assets");
        Ok(assets)
    }

    async fn person_statistics(&self, person: &PersonId, ctx: &RequestContext) -> Result<u64> {
        let url = self.person_statistics_url(person);
        debug!(
            request_id = %ctx.request_id,
            device_id = %ctx.device_id,
            person_id = %person,
            "Requesting person statistics"
        );

        let statistics: PersonStatistics =
            self.send(self.request(Method::GET, &url), &url).await?;
        Ok(statistics.assets)
    }
}

fn truncate(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY {
        trimmed.to_string()
    } else {
        let mut short: String = trimmed.chars().take(MAX_ERROR_BODY).collect();
        short.push_str("...");
        short
    }
}
