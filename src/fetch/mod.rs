//! HTTP transport for the climate API: one JSON GET per call, with failures classified
//! as network errors, HTTP status errors or undecodable bodies.

pub mod error;

use crate::analysis::Endpoint;
use crate::config::ClientConfig;
use crate::fetch::error::FetchError;
use crate::query::QueryParams;
use log::{debug, warn};
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use url::Url;

pub struct ApiClient {
    config: ClientConfig,
    http: Client,
}

impl ApiClient {
    /// Builds the underlying HTTP client with the configured timeout.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The full request URL for `endpoint` with `params` as its query string.
    pub fn url_for(&self, endpoint: Endpoint, params: &QueryParams) -> Result<Url, FetchError> {
        let raw = self.config.endpoint_url(endpoint.path());
        let mut url = Url::parse(&raw).map_err(|e| FetchError::InvalidUrl(raw, e))?;
        if !params.is_empty() {
            url.set_query(Some(&params.to_query_string()));
        }
        Ok(url)
    }

    /// GETs `endpoint` and parses the body as JSON.
    ///
    /// A non-2xx response has its body read as text and returned inside
    /// [`FetchError::HttpError`] together with the status code.
    pub async fn get_json(
        &self,
        endpoint: Endpoint,
        params: &QueryParams,
    ) -> Result<Value, FetchError> {
        let url = self.url_for(endpoint, params)?;
        debug!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::NetworkFailure {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => format!("<body unreadable: {e}>"),
            };
            warn!("HTTP {} for {}: {}", status, url, body);
            return Err(FetchError::HttpError {
                url: url.to_string(),
                status,
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::NetworkFailure {
                url: url.to_string(),
                source: e,
            })?;
        serde_json::from_str(&body).map_err(|e| FetchError::InvalidJson {
            url: url.to_string(),
            source: e,
        })
    }
}
