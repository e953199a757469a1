use crate::normalize::error::NormalizeError;
use crate::normalize::{
    decode_items, extract_items, Envelope, Normalized, Normalizer, NormalizerKind,
};
use crate::types::trend_point::TrendPoint;
use serde_json::Value;

/// Trend mode: the payload is already analysis-ready. Items are extracted from the
/// envelope (or a bare array) and passed through; no chart series are derived.
pub struct TrendNormalizer;

impl Normalizer for TrendNormalizer {
    type Row = TrendPoint;

    const KIND: NormalizerKind = NormalizerKind::Trend;

    fn normalize(&self, payload: Value) -> Result<Normalized<TrendPoint>, NormalizeError> {
        let items = extract_items(Self::KIND, payload, Envelope::DataOrArray)?;
        Ok(Normalized {
            table_rows: decode_items(Self::KIND, items)?,
            chart_series: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_passes_through() {
        let normalized = TrendNormalizer
            .normalize(json!({"data": [
                {"metric_id": 1, "metric_display_name": "Temperature", "direction": "increasing",
                 "rate_of_change": 0.021, "anomalies": ["2025-02-11"], "seasonality": {"01": 9.5},
                 "confidence": 0.83},
                {"metric_id": 2, "metric_display_name": "Humidity", "direction": null,
                 "rate_of_change": null, "anomalies": [], "seasonality": {}, "confidence": null}
            ]}))
            .unwrap();

        assert_eq!(normalized.table_rows.len(), 2);
        assert!(normalized.chart_series.is_empty());
        assert_eq!(normalized.table_rows[0].metric().as_deref(), Some("Temperature"));
        assert_eq!(
            normalized.table_rows[0].get("anomalies"),
            Some(&json!(["2025-02-11"]))
        );
    }

    #[test]
    fn test_bare_array_is_accepted() {
        let normalized = TrendNormalizer
            .normalize(json!([{"metric": "temperature", "slope": 0.5}]))
            .unwrap();
        assert_eq!(normalized.table_rows[0].metric().as_deref(), Some("temperature"));
    }

    #[test]
    fn test_non_object_items_are_malformed() {
        let result = TrendNormalizer.normalize(json!({"data": [1, 2, 3]}));
        assert!(matches!(result, Err(NormalizeError::MalformedItem { index: 0, .. })));
    }

    #[test]
    fn test_envelope_without_data_is_malformed() {
        let result = TrendNormalizer.normalize(json!({"error": "boom"}));
        assert!(matches!(result, Err(NormalizeError::MalformedResponse { .. })));
    }
}
