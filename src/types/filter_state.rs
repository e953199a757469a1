//! Defines [`FilterState`], the user's current query intent, together with the
//! [`FilterField`] names used to edit it and the [`AnalysisType`] that selects how the
//! result is computed and shaped.

use crate::types::climate_record::QualityCode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The analysis mode: selects both the backend endpoint and the response normalizer.
///
/// Parsing is total. Any value other than `"trends"` or `"weighted"` resolves to
/// [`AnalysisType::Raw`].
///
/// # Examples
///
/// ```
/// use ecovision::AnalysisType;
///
/// assert_eq!(AnalysisType::from("weighted"), AnalysisType::Weighted);
/// assert_eq!(AnalysisType::from("trends"), AnalysisType::Trends);
/// assert_eq!(AnalysisType::from("histogram"), AnalysisType::Raw);
/// assert_eq!(AnalysisType::default(), AnalysisType::Raw);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum AnalysisType {
    /// Individual observations, charted over time and by quality bucket.
    #[default]
    Raw,
    /// Backend-computed trend analysis per metric.
    Trends,
    /// Backend-computed quality-weighted summary statistics per metric.
    Weighted,
}

impl AnalysisType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisType::Raw => "raw",
            AnalysisType::Trends => "trends",
            AnalysisType::Weighted => "weighted",
        }
    }
}

impl From<&str> for AnalysisType {
    fn from(value: &str) -> Self {
        match value {
            "trends" => AnalysisType::Trends,
            "weighted" => AnalysisType::Weighted,
            _ => AnalysisType::Raw,
        }
    }
}

impl From<String> for AnalysisType {
    fn from(value: String) -> Self {
        AnalysisType::from(value.as_str())
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names one editable field of a [`FilterState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    LocationId,
    StartDate,
    EndDate,
    Metric,
    QualityThreshold,
    AnalysisType,
}

impl FilterField {
    /// All fields, in the order the query is emitted.
    pub const ALL: [FilterField; 6] = [
        FilterField::LocationId,
        FilterField::StartDate,
        FilterField::EndDate,
        FilterField::Metric,
        FilterField::QualityThreshold,
        FilterField::AnalysisType,
    ];

    /// Resolves the camelCase name a form control reports (`"locationId"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "locationId" => Some(FilterField::LocationId),
            "startDate" => Some(FilterField::StartDate),
            "endDate" => Some(FilterField::EndDate),
            "metric" => Some(FilterField::Metric),
            "qualityThreshold" => Some(FilterField::QualityThreshold),
            "analysisType" => Some(FilterField::AnalysisType),
            _ => None,
        }
    }

    /// The transport key for this field, or `None` for fields that never reach the
    /// query string (the analysis mode is expressed by the endpoint instead).
    pub fn query_key(&self) -> Option<&'static str> {
        match self {
            FilterField::LocationId => Some("location_id"),
            FilterField::StartDate => Some("start_date"),
            FilterField::EndDate => Some("end_date"),
            FilterField::Metric => Some("metric"),
            FilterField::QualityThreshold => Some("quality_threshold"),
            FilterField::AnalysisType => None,
        }
    }
}

/// The user's current query intent.
///
/// Every field except the analysis mode is optional. A field holding `None` or an
/// empty string is "unset" and is left out of the query; `"0"` is a real value.
/// Edits produce a new value ([`FilterState::with_field`]); the session replaces its
/// state wholesale rather than mutating it in place.
///
/// Date ordering (`start_date <= end_date`) is *not* validated here. The backend owns
/// that check.
///
/// # Examples
///
/// ```
/// use ecovision::{AnalysisType, FilterField, FilterState};
///
/// let filters = FilterState::default()
///     .with_field(FilterField::LocationId, "Irvine")
///     .with_field(FilterField::QualityThreshold, 0)
///     .with_analysis_type(AnalysisType::Weighted);
///
/// assert_eq!(filters.location_id.as_deref(), Some("Irvine"));
/// assert_eq!(filters.quality_threshold.as_deref(), Some("0"));
/// assert_eq!(filters.analysis_type, AnalysisType::Weighted);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub location_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub metric: Option<String>,
    pub quality_threshold: Option<String>,
    #[serde(default)]
    pub analysis_type: AnalysisType,
}

impl FilterState {
    /// Returns a copy with `field` set to `value`.
    ///
    /// Setting [`FilterField::AnalysisType`] parses the value with the same fallback
    /// rules as [`AnalysisType::from`].
    pub fn with_field(mut self, field: FilterField, value: impl ToString) -> Self {
        let value = value.to_string();
        match field {
            FilterField::LocationId => self.location_id = Some(value),
            FilterField::StartDate => self.start_date = Some(value),
            FilterField::EndDate => self.end_date = Some(value),
            FilterField::Metric => self.metric = Some(value),
            FilterField::QualityThreshold => self.quality_threshold = Some(value),
            FilterField::AnalysisType => self.analysis_type = AnalysisType::from(value),
        }
        self
    }

    /// Returns a copy with `field` unset. Clearing the analysis mode restores `raw`.
    pub fn without_field(mut self, field: FilterField) -> Self {
        match field {
            FilterField::LocationId => self.location_id = None,
            FilterField::StartDate => self.start_date = None,
            FilterField::EndDate => self.end_date = None,
            FilterField::Metric => self.metric = None,
            FilterField::QualityThreshold => self.quality_threshold = None,
            FilterField::AnalysisType => self.analysis_type = AnalysisType::default(),
        }
        self
    }

    pub fn with_analysis_type(mut self, analysis_type: AnalysisType) -> Self {
        self.analysis_type = analysis_type;
        self
    }

    /// Sets both date bounds, formatted as `YYYY-MM-DD`.
    pub fn with_date_range(self, start: NaiveDate, end: NaiveDate) -> Self {
        self.with_field(FilterField::StartDate, start.format("%Y-%m-%d"))
            .with_field(FilterField::EndDate, end.format("%Y-%m-%d"))
    }

    /// Sets the quality threshold to the backend weight of `quality`, so only
    /// observations of that bucket or better are returned.
    ///
    /// ```
    /// use ecovision::{FilterState, QualityCode};
    ///
    /// let filters = FilterState::default().with_minimum_quality(QualityCode::Good);
    /// assert_eq!(filters.quality_threshold.as_deref(), Some("0.8"));
    /// ```
    pub fn with_minimum_quality(self, quality: QualityCode) -> Self {
        self.with_field(FilterField::QualityThreshold, quality.weight())
    }

    /// The raw value of a field, `None` when unset. The analysis mode is always set.
    pub fn value(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::LocationId => self.location_id.as_deref(),
            FilterField::StartDate => self.start_date.as_deref(),
            FilterField::EndDate => self.end_date.as_deref(),
            FilterField::Metric => self.metric.as_deref(),
            FilterField::QualityThreshold => self.quality_threshold.as_deref(),
            FilterField::AnalysisType => Some(self.analysis_type.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let filters = FilterState::default();
        assert_eq!(filters.analysis_type, AnalysisType::Raw);
        assert!(filters.location_id.is_none());
        assert!(filters.quality_threshold.is_none());
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in FilterField::ALL {
            let name = match field {
                FilterField::LocationId => "locationId",
                FilterField::StartDate => "startDate",
                FilterField::EndDate => "endDate",
                FilterField::Metric => "metric",
                FilterField::QualityThreshold => "qualityThreshold",
                FilterField::AnalysisType => "analysisType",
            };
            assert_eq!(FilterField::from_name(name), Some(field));
        }
        assert_eq!(FilterField::from_name("location_id"), None);
    }

    #[test]
    fn test_with_field_replaces_value() {
        let first = FilterState::default().with_field(FilterField::Metric, "humidity");
        let second = first.clone().with_field(FilterField::Metric, "temperature");
        assert_eq!(first.metric.as_deref(), Some("humidity"));
        assert_eq!(second.metric.as_deref(), Some("temperature"));
    }

    #[test]
    fn test_unknown_analysis_type_is_raw() {
        let filters = FilterState::default()
            .with_analysis_type(AnalysisType::Weighted)
            .with_field(FilterField::AnalysisType, "bogus");
        assert_eq!(filters.analysis_type, AnalysisType::Raw);
    }

    #[test]
    fn test_date_range_formatting() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let filters = FilterState::default().with_date_range(start, end);
        assert_eq!(filters.start_date.as_deref(), Some("2025-01-01"));
        assert_eq!(filters.end_date.as_deref(), Some("2025-03-09"));
    }

    #[test]
    fn test_minimum_quality_uses_backend_weight() {
        let excellent = FilterState::default().with_minimum_quality(QualityCode::Excellent);
        let poor = FilterState::default().with_minimum_quality(QualityCode::Poor);
        assert_eq!(excellent.quality_threshold.as_deref(), Some("1"));
        assert_eq!(poor.quality_threshold.as_deref(), Some("0.3"));
    }

    #[test]
    fn test_deserialize_camel_case_with_unknown_mode() {
        let filters: FilterState = serde_json::from_value(serde_json::json!({
            "locationId": "Tokyo",
            "analysisType": "something-new"
        }))
        .unwrap();
        assert_eq!(filters.location_id.as_deref(), Some("Tokyo"));
        assert_eq!(filters.analysis_type, AnalysisType::Raw);
    }
}
