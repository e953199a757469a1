use crate::types::climate_record::QualityCode;
use serde::{Deserialize, Serialize};

/// Count of observations per quality bucket for one metric.
///
/// Absent or `null` buckets read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QualityDistribution {
    #[serde(default)]
    pub excellent: Option<u64>,
    #[serde(default)]
    pub good: Option<u64>,
    #[serde(default)]
    pub questionable: Option<u64>,
    #[serde(default)]
    pub poor: Option<u64>,
}

impl QualityDistribution {
    pub fn count(&self, quality: QualityCode) -> u64 {
        let bucket = match quality {
            QualityCode::Excellent => self.excellent,
            QualityCode::Good => self.good,
            QualityCode::Questionable => self.questionable,
            QualityCode::Poor => self.poor,
        };
        bucket.unwrap_or(0)
    }

    /// Counts in display order (Excellent, Good, Questionable, Poor).
    pub fn counts(&self) -> [u64; 4] {
        QualityCode::ALL.map(|quality| self.count(quality))
    }
}

/// Backend-computed weighted statistics for one metric.
///
/// The backend's own column names `min` and `max` are accepted as aliases. Its
/// `metric_display_name` is kept separately and used when `metric` is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedSummaryItem {
    #[serde(default)]
    pub metric: Option<String>,
    #[serde(default)]
    pub metric_display_name: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default, alias = "min")]
    pub weighted_min: Option<f64>,
    #[serde(default, alias = "max")]
    pub weighted_max: Option<f64>,
    #[serde(default)]
    pub weighted_avg: Option<f64>,
    #[serde(default)]
    pub quality_distribution: Option<QualityDistribution>,
}

impl WeightedSummaryItem {
    /// `false` only when all three statistics are present and out of order.
    pub fn is_ordered(&self) -> bool {
        match (self.weighted_min, self.weighted_avg, self.weighted_max) {
            (Some(min), Some(avg), Some(max)) => min <= avg && avg <= max,
            _ => true,
        }
    }

    /// `metric`, else `metric_display_name`.
    pub fn metric_name(&self) -> Option<&str> {
        self.metric
            .as_deref()
            .or(self.metric_display_name.as_deref())
    }

    pub fn distribution(&self) -> QualityDistribution {
        self.quality_distribution.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_buckets_default_to_zero() {
        let item: WeightedSummaryItem = serde_json::from_value(json!({
            "metric": "temperature",
            "quality_distribution": {"excellent": 5, "good": 3, "poor": null}
        }))
        .unwrap();
        assert_eq!(item.distribution().counts(), [5, 3, 0, 0]);
    }

    #[test]
    fn test_missing_distribution_is_all_zero() {
        let item: WeightedSummaryItem =
            serde_json::from_value(json!({"metric": "humidity"})).unwrap();
        assert_eq!(item.distribution().counts(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_negative_count_is_rejected() {
        let result = serde_json::from_value::<WeightedSummaryItem>(json!({
            "metric": "humidity",
            "quality_distribution": {"excellent": -1}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_backend_aliases() {
        let item: WeightedSummaryItem = serde_json::from_value(json!({
            "metric_id": 1,
            "metric_display_name": "Temperature",
            "min": 1.5,
            "max": 9.0,
            "weighted_avg": 4.25
        }))
        .unwrap();
        assert_eq!(item.metric, None);
        assert_eq!(item.metric_name(), Some("Temperature"));
        assert_eq!(item.weighted_min, Some(1.5));
        assert_eq!(item.weighted_max, Some(9.0));
    }

    #[test]
    fn test_both_metric_keys_present() {
        let item: WeightedSummaryItem = serde_json::from_value(json!({
            "metric": "temperature",
            "metric_display_name": "Air Temperature",
            "weighted_avg": 1.0
        }))
        .unwrap();
        assert_eq!(item.metric_name(), Some("temperature"));
    }

    #[test]
    fn test_ordering_check() {
        let mut item: WeightedSummaryItem = serde_json::from_value(json!({
            "weighted_min": 1.0, "weighted_avg": 2.0, "weighted_max": 3.0
        }))
        .unwrap();
        assert!(item.is_ordered());
        item.weighted_avg = Some(4.0);
        assert!(!item.is_ordered());
        item.weighted_max = None;
        assert!(item.is_ordered());
    }
}
