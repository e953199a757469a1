//! Defines [`ClimateRecord`], a single raw observation, and the [`QualityCode`]
//! classification attached to it.

use crate::utils::{capitalize, string_or_number};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// The discrete data-quality classification of an observation.
///
/// The declaration order is the fixed display order used for every quality chart:
/// Excellent, Good, Questionable, Poor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityCode {
    Excellent,
    Good,
    Questionable,
    Poor,
}

impl QualityCode {
    /// All buckets, in display order.
    pub const ALL: [QualityCode; 4] = [
        QualityCode::Excellent,
        QualityCode::Good,
        QualityCode::Questionable,
        QualityCode::Poor,
    ];

    /// The chart category label (`"Excellent"`, ...).
    pub fn label(&self) -> &'static str {
        match self {
            QualityCode::Excellent => "Excellent",
            QualityCode::Good => "Good",
            QualityCode::Questionable => "Questionable",
            QualityCode::Poor => "Poor",
        }
    }

    /// The weight the backend assigns this bucket when computing weighted statistics
    /// and when applying a `quality_threshold` (observations below the threshold are
    /// dropped).
    pub fn weight(&self) -> f64 {
        match self {
            QualityCode::Excellent => 1.0,
            QualityCode::Good => 0.8,
            QualityCode::Questionable => 0.5,
            QualityCode::Poor => 0.3,
        }
    }

    /// Position of the bucket in [`QualityCode::ALL`].
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }

    /// The category labels of a quality chart, in display order.
    pub fn labels() -> Vec<String> {
        QualityCode::ALL.iter().map(|q| q.label().to_string()).collect()
    }
}

impl fmt::Display for QualityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}

/// One raw observation as returned by the climate-data endpoint.
///
/// The decoder accepts the backend's column names as aliases: `date` for
/// `timestamp`, `quality` for `quality_code`, and `metric` either as a plain name or
/// as the joined metric object (whose `name` is used, and whose `unit` fills in a
/// missing top-level `unit`). Numeric ids are read as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ClimateRecordWire")]
pub struct ClimateRecord {
    pub location_id: String,
    pub metric: String,
    pub unit: Option<String>,
    pub timestamp: String,
    pub value: f64,
    pub quality_code: QualityCode,
}

#[derive(Deserialize)]
struct ClimateRecordWire {
    #[serde(deserialize_with = "string_or_number")]
    location_id: String,
    #[serde(deserialize_with = "metric_source")]
    metric: MetricSource,
    #[serde(default)]
    unit: Option<String>,
    #[serde(alias = "date")]
    timestamp: String,
    value: f64,
    #[serde(alias = "quality")]
    quality_code: QualityCode,
}

/// The name and, for a joined metric object, the unit of a record's metric.
struct MetricSource {
    name: String,
    unit: Option<String>,
}

impl From<ClimateRecordWire> for ClimateRecord {
    fn from(wire: ClimateRecordWire) -> Self {
        ClimateRecord {
            location_id: wire.location_id,
            metric: wire.metric.name,
            unit: wire.unit.or(wire.metric.unit),
            timestamp: wire.timestamp,
            value: wire.value,
            quality_code: wire.quality_code,
        }
    }
}

impl ClimateRecord {
    /// The calendar date of the observation, read from the `YYYY-MM-DD` prefix of the
    /// timestamp. `None` when the timestamp is in another format.
    pub fn date(&self) -> Option<NaiveDate> {
        let prefix = self.timestamp.get(..10)?;
        NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
    }

    /// The metric name as shown in legends.
    pub fn metric_label(&self) -> String {
        capitalize(&self.metric)
    }
}

fn metric_source<'de, D>(deserializer: D) -> Result<MetricSource, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(name) => Ok(MetricSource { name, unit: None }),
        Value::Object(map) => {
            let name = map
                .get("name")
                .or_else(|| map.get("display_name"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| serde::de::Error::custom("metric object has no name"))?;
            let unit = map.get("unit").and_then(Value::as_str).map(str::to_string);
            Ok(MetricSource { name, unit })
        }
        other => Err(serde::de::Error::custom(format!(
            "expected a metric name or object, found {other}"
        ))),
    }
}
