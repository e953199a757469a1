//! Maps the selected analysis mode to the backend endpoint that computes it and the
//! normalizer that shapes its response.

use crate::normalize::NormalizerKind;
use crate::types::filter_state::AnalysisType;
use std::fmt;

/// A backend endpoint, relative to the configured API path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Locations,
    Metrics,
    ClimateData,
    Trends,
    Summary,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Locations => "/locations",
            Endpoint::Metrics => "/metrics",
            Endpoint::ClimateData => "/climate",
            Endpoint::Trends => "/trends",
            Endpoint::Summary => "/summary",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// The endpoint/normalizer pair an analysis mode resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub endpoint: Endpoint,
    pub normalizer: NormalizerKind,
}

/// Resolves analysis modes to [`Route`]s.
///
/// | mode | endpoint | normalizer |
/// |---|---|---|
/// | `raw` (and anything unrecognised) | `/climate` | Raw |
/// | `trends` | `/trends` | Trend |
/// | `weighted` | `/summary` | Weighted |
///
/// ```
/// use ecovision::{AnalysisRouter, Endpoint, NormalizerKind};
///
/// let route = AnalysisRouter::route_name("weighted");
/// assert_eq!(route.endpoint, Endpoint::Summary);
/// assert_eq!(route.normalizer, NormalizerKind::Weighted);
///
/// assert_eq!(AnalysisRouter::route_name("pie-chart").endpoint, Endpoint::ClimateData);
/// ```
pub struct AnalysisRouter;

impl AnalysisRouter {
    pub fn route(analysis_type: AnalysisType) -> Route {
        match analysis_type {
            AnalysisType::Raw => Route {
                endpoint: Endpoint::ClimateData,
                normalizer: NormalizerKind::Raw,
            },
            AnalysisType::Trends => Route {
                endpoint: Endpoint::Trends,
                normalizer: NormalizerKind::Trend,
            },
            AnalysisType::Weighted => Route {
                endpoint: Endpoint::Summary,
                normalizer: NormalizerKind::Weighted,
            },
        }
    }

    /// Routes an untyped mode name; unknown names take the `raw` route.
    pub fn route_name(name: &str) -> Route {
        Self::route(AnalysisType::from(name))
    }
}
