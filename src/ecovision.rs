//! This module provides the main entry point for querying the climate API.
//! It routes a filter snapshot to the endpoint of its analysis mode and returns the
//! normalized result, and it loads the dropdown option lists.

use crate::analysis::{AnalysisRouter, Endpoint, Route};
use crate::config::ClientConfig;
use crate::error::EcoVisionError;
use crate::fetch::ApiClient;
use crate::normalize::error::NormalizeError;
use crate::normalize::NormalizedData;
use crate::query::{QueryBuilder, QueryParams};
use crate::types::climate_record::QualityCode;
use crate::types::filter_state::{AnalysisType, FilterState};
use crate::types::options::{DropdownOptions, Location, Metric};
use bon::bon;
use chrono::NaiveDate;
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// The client for the climate API.
///
/// Create an instance using [`EcoVision::new()`] (configuration from the environment,
/// see [`ClientConfig::from_env`]) or [`EcoVision::with_config()`].
///
/// # Examples
///
/// ```no_run
/// # use ecovision::{AnalysisType, EcoVision, EcoVisionError, FilterField, FilterState};
/// # #[tokio::main]
/// # async fn main() -> Result<(), EcoVisionError> {
/// let client = EcoVision::new()?;
///
/// let filters = FilterState::default()
///     .with_field(FilterField::LocationId, "Irvine")
///     .with_analysis_type(AnalysisType::Weighted);
///
/// let data = client.fetch(&filters).await?;
/// println!("{} summary rows", data.row_count());
/// # Ok(())
/// # }
/// ```
pub struct EcoVision {
    api: ApiClient,
}

#[bon]
impl EcoVision {
    /// Creates a client configured from `ECOVISION_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`EcoVisionError::ClientBuild`] if the HTTP client cannot be initialised.
    pub fn new() -> Result<Self, EcoVisionError> {
        Self::with_config(ClientConfig::from_env())
    }

    /// Creates a client with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EcoVisionError::ClientBuild`] if the HTTP client cannot be initialised.
    pub fn with_config(config: ClientConfig) -> Result<Self, EcoVisionError> {
        info!(
            "Climate API at {}{} (timeout {:?})",
            config.base_url, config.api_path, config.timeout
        );
        Ok(Self {
            api: ApiClient::new(config).map_err(EcoVisionError::ClientBuild)?,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        self.api.config()
    }

    /// Fetches and normalizes the analysis selected by `filters.analysis_type`.
    ///
    /// # Errors
    ///
    /// * [`EcoVisionError::Fetch`] for network failures (including timeouts) and non-2xx
    ///   responses; the latter carry the status code and response body.
    /// * [`EcoVisionError::Normalize`] when the response lacks the data this mode needs.
    pub async fn fetch(&self, filters: &FilterState) -> Result<NormalizedData, EcoVisionError> {
        let route = AnalysisRouter::route(filters.analysis_type);
        self.fetch_route(route, &QueryBuilder::build(filters)).await
    }

    /// Fetches `route.endpoint` with `params` and runs `route.normalizer` on the body.
    pub async fn fetch_route(
        &self,
        route: Route,
        params: &QueryParams,
    ) -> Result<NormalizedData, EcoVisionError> {
        let payload = self.api.get_json(route.endpoint, params).await?;
        Ok(route.normalizer.normalize(payload)?)
    }

    /// Builder-style variant of [`EcoVision::fetch`].
    ///
    /// * `.analysis_type(AnalysisType)`: **Required.**
    /// * `.location_id(..)`, `.metric(..)`: Optional filters.
    /// * `.start_date(NaiveDate)`, `.end_date(NaiveDate)`: Optional bounds, sent as `YYYY-MM-DD`.
    /// * `.minimum_quality(QualityCode)`: Optional; sent as that bucket's weight.
    ///
    /// ```no_run
    /// # use ecovision::{AnalysisType, EcoVision, EcoVisionError, QualityCode};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), EcoVisionError> {
    /// let client = EcoVision::new()?;
    /// let trends = client
    ///     .analysis()
    ///     .analysis_type(AnalysisType::Trends)
    ///     .metric("temperature")
    ///     .minimum_quality(QualityCode::Good)
    ///     .call()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn analysis(
        &self,
        analysis_type: AnalysisType,
        #[builder(into)] location_id: Option<String>,
        #[builder(into)] metric: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        minimum_quality: Option<QualityCode>,
    ) -> Result<NormalizedData, EcoVisionError> {
        let mut filters = FilterState {
            location_id,
            metric,
            start_date: start_date.map(|d| d.format("%Y-%m-%d").to_string()),
            end_date: end_date.map(|d| d.format("%Y-%m-%d").to_string()),
            ..FilterState::default()
        }
        .with_analysis_type(analysis_type);
        if let Some(quality) = minimum_quality {
            filters = filters.with_minimum_quality(quality);
        }
        self.fetch(&filters).await
    }

    pub async fn locations(&self) -> Result<Vec<Location>, EcoVisionError> {
        self.option_list(Endpoint::Locations).await
    }

    pub async fn metrics(&self) -> Result<Vec<Metric>, EcoVisionError> {
        self.option_list(Endpoint::Metrics).await
    }

    /// Loads locations and metrics concurrently. Each list that fails to load is
    /// logged and left empty; this never fails as a whole.
    pub async fn load_options(&self) -> DropdownOptions {
        let (locations, metrics) = tokio::join!(self.locations(), self.metrics());
        DropdownOptions {
            locations: locations.unwrap_or_else(|e| {
                warn!("Could not load locations, using defaults: {}", e);
                Vec::new()
            }),
            metrics: metrics.unwrap_or_else(|e| {
                warn!("Could not load metrics, using defaults: {}", e);
                Vec::new()
            }),
        }
    }

    async fn option_list<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
    ) -> Result<Vec<T>, EcoVisionError> {
        let payload = self.api.get_json(endpoint, &QueryParams::default()).await?;
        Ok(decode_option_list(endpoint, payload)?)
    }
}

fn decode_option_list<T: DeserializeOwned>(
    endpoint: Endpoint,
    mut payload: Value,
) -> Result<Vec<T>, NormalizeError> {
    let malformed = |reason: String| NormalizeError::MalformedOptions { endpoint, reason };
    match payload.get_mut("data").map(Value::take) {
        Some(data @ Value::Array(_)) => {
            serde_json::from_value(data).map_err(|e| malformed(e.to_string()))
        }
        Some(_) => Err(malformed("top-level `data` is not an array".to_string())),
        None => Err(malformed("missing top-level `data` array".to_string())),
    }
}
