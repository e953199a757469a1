use crate::chart::ChartConfig;
use crate::ecovision::EcoVision;
use crate::quality::QualityReport;
use crate::session::state::{CommitOutcome, DisplayState, PendingRequest, Session};
use crate::types::filter_state::{AnalysisType, FilterField, FilterState};
use crate::types::options::DropdownOptions;
use log::debug;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A shareable handle pairing an [`EcoVision`] client with one [`Session`].
///
/// The session lock is never held across a request, so edits and new applies
/// proceed while a fetch is in flight.
///
/// ```no_run
/// # use ecovision::{AnalysisType, Dashboard, EcoVision, EcoVisionError, FilterField};
/// # #[tokio::main]
/// # async fn main() -> Result<(), EcoVisionError> {
/// let dashboard = Dashboard::new(EcoVision::new()?);
/// dashboard.load_options().await;
///
/// dashboard.update_field(FilterField::LocationId, "Irvine").await;
/// dashboard.switch_mode(AnalysisType::Weighted).await;
/// dashboard.apply_filters().await;
///
/// for chart in dashboard.chart_configs().await {
///     println!("{}", chart.title);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Dashboard {
    client: Arc<EcoVision>,
    session: Arc<Mutex<Session>>,
}

impl Dashboard {
    pub fn new(client: EcoVision) -> Self {
        Self {
            client: Arc::new(client),
            session: Arc::new(Mutex::new(Session::new())),
        }
    }

    /// Loads the dropdown lists into the session. Failures leave the affected list
    /// empty so the static defaults are offered.
    pub async fn load_options(&self) -> DropdownOptions {
        let options = self.client.load_options().await;
        self.session.lock().await.set_options(options.clone());
        options
    }

    pub async fn update_field(&self, field: FilterField, value: impl ToString) {
        self.session.lock().await.update_field(field, value);
    }

    pub async fn clear_field(&self, field: FilterField) {
        self.session.lock().await.clear_field(field);
    }

    pub async fn switch_mode(&self, analysis_type: AnalysisType) {
        self.session.lock().await.switch_mode(analysis_type);
    }

    pub async fn reset(&self) {
        self.session.lock().await.reset();
    }

    /// Issues a request for the current filters without performing it.
    pub async fn begin_apply(&self) -> PendingRequest {
        self.session.lock().await.begin_apply()
    }

    /// Performs `pending` and commits its result if it is still the latest request.
    pub async fn resolve(&self, pending: PendingRequest) -> CommitOutcome {
        if !self.session.lock().await.is_current(pending.ticket) {
            debug!(
                "Request #{} superseded before it was sent",
                pending.ticket.generation()
            );
            return CommitOutcome::Discarded;
        }
        let result = self
            .client
            .fetch_route(pending.route, &pending.params)
            .await;
        self.session.lock().await.commit(pending.ticket, result)
    }

    /// Applies the current filters: issue, fetch, commit.
    pub async fn apply_filters(&self) -> CommitOutcome {
        let pending = self.begin_apply().await;
        self.resolve(pending).await
    }

    pub async fn filters(&self) -> FilterState {
        self.session.lock().await.filters().clone()
    }

    pub async fn display(&self) -> DisplayState {
        self.session.lock().await.display().clone()
    }

    pub async fn options(&self) -> DropdownOptions {
        self.session.lock().await.options().clone()
    }

    pub async fn quality_report(&self) -> QualityReport {
        self.session.lock().await.quality_report()
    }

    pub async fn chart_configs(&self) -> Vec<ChartConfig> {
        self.session.lock().await.chart_configs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::normalize::NormalizedData;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn summary(metric: &str, avg: f64) -> serde_json::Value {
        json!({"data": [{
            "metric": metric, "unit": "C",
            "weighted_min": avg - 1.0, "weighted_max": avg + 1.0, "weighted_avg": avg,
            "quality_distribution": {"excellent": 1}
        }]})
    }

    async fn slow_and_fast_server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/summary"))
            .and(query_param("location_id", "London"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(summary("rainfall", 3.0))
                    .set_delay(Duration::from_millis(400)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/summary"))
            .and(query_param("location_id", "Tokyo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(summary("temperature", 20.0)))
            .mount(&server)
            .await;
        server
    }

    fn dashboard_for(server: &MockServer) -> Dashboard {
        let config = ClientConfig::builder()
            .base_url(server.uri())
            .timeout(Duration::from_secs(5))
            .build();
        Dashboard::new(EcoVision::with_config(config).unwrap())
    }

    fn displayed_metric(display: &DisplayState) -> Option<String> {
        match display.data() {
            Some(NormalizedData::Weighted(n)) => n.table_rows.first().map(|r| r.metric.clone()),
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_newer_apply_wins_over_slow_stale_response() {
        let server = slow_and_fast_server().await;
        let dashboard = dashboard_for(&server);
        dashboard.switch_mode(AnalysisType::Weighted).await;

        dashboard.update_field(FilterField::LocationId, "London").await;
        let first = dashboard.begin_apply().await;
        let slow = {
            let dashboard = dashboard.clone();
            tokio::spawn(async move { dashboard.resolve(first).await })
        };
        // Let the slow request reach the server.
        tokio::time::sleep(Duration::from_millis(100)).await;

        dashboard.update_field(FilterField::LocationId, "Tokyo").await;
        assert_eq!(dashboard.apply_filters().await, CommitOutcome::Applied);
        assert_eq!(
            displayed_metric(&dashboard.display().await).as_deref(),
            Some("Temperature")
        );

        assert_eq!(slow.await.unwrap(), CommitOutcome::Discarded);
        assert_eq!(
            displayed_metric(&dashboard.display().await).as_deref(),
            Some("Temperature")
        );
    }

    #[tokio::test]
    async fn test_superseded_request_is_not_sent() {
        let server = slow_and_fast_server().await;
        let dashboard = dashboard_for(&server);
        dashboard.switch_mode(AnalysisType::Weighted).await;

        dashboard.update_field(FilterField::LocationId, "Tokyo").await;
        let first = dashboard.begin_apply().await;
        dashboard.update_field(FilterField::LocationId, "London").await;
        let second = dashboard.begin_apply().await;

        assert_eq!(dashboard.resolve(first).await, CommitOutcome::Discarded);
        assert!(dashboard.display().await.is_loading());
        assert_eq!(dashboard.resolve(second).await, CommitOutcome::Applied);
        assert_eq!(
            displayed_metric(&dashboard.display().await).as_deref(),
            Some("Rainfall")
        );

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.query(), Some("location_id=London"));
    }

    #[tokio::test]
    async fn test_failed_apply_shows_no_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/climate"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let dashboard = dashboard_for(&server);
        assert_eq!(dashboard.apply_filters().await, CommitOutcome::Applied);
        assert_eq!(dashboard.display().await, DisplayState::NoData);
        assert_eq!(dashboard.quality_report().await, QualityReport::NoData);
    }

    #[tokio::test]
    async fn test_raw_apply_feeds_quality_and_charts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/climate"))
            .and(query_param("metric", "temperature"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [
                {"location_id": 1, "metric": "temperature", "unit": "C",
                 "timestamp": "2025-03-01", "value": 14.2, "quality_code": "good"}
            ]})))
            .mount(&server)
            .await;

        let dashboard = dashboard_for(&server);
        dashboard.update_field(FilterField::Metric, "temperature").await;
        dashboard.apply_filters().await;

        let report = dashboard.quality_report().await;
        assert_eq!(report.summary().map(|s| s.total), Some(1));
        assert_eq!(dashboard.chart_configs().await.len(), 2);
    }

    #[tokio::test]
    async fn test_load_options_falls_back_on_failure() {
        let server = MockServer::start().await;
        let dashboard = dashboard_for(&server);

        let options = dashboard.load_options().await;
        assert!(options.locations.is_empty());
        let labels: Vec<_> = dashboard
            .options()
            .await
            .location_choices()
            .into_iter()
            .map(|c| c.label)
            .collect();
        assert_eq!(labels, vec!["Irvine", "London", "Tokyo"]);
    }
}
