use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One item of a trend-analysis payload.
///
/// The backend owns this shape (direction, rate of change, anomalies, seasonality,
/// confidence, ...), so the item is kept as an opaque JSON object. Only the metric key
/// is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrendPoint {
    pub fields: Map<String, Value>,
}

impl TrendPoint {
    /// The metric this trend describes: `metric`, else `metric_display_name`, else
    /// `metric_id` (numbers rendered as text).
    pub fn metric(&self) -> Option<String> {
        ["metric", "metric_display_name", "metric_id"]
            .iter()
            .filter_map(|key| self.fields.get(*key))
            .find_map(|value| match value {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}
