use crate::normalize::error::NormalizeError;
use crate::normalize::{
    decode_items, extract_items, DataSeries, Envelope, Normalized, Normalizer, NormalizerKind,
    SeriesKind,
};
use crate::types::climate_record::QualityCode;
use crate::types::weighted_summary::WeightedSummaryItem;
use crate::utils::{capitalize, round_half_away_from_zero};
use log::warn;
use serde::Serialize;
use serde_json::Value;

/// Decimal places kept for weighted statistics.
const STAT_DECIMALS: usize = 2;

/// One table row of the weighted summary view.
///
/// `metric` is capitalized for display. The three statistics are rounded to two
/// decimals, half away from zero (see [`WeightedNormalizer`]); a statistic the backend
/// did not send stays `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedRow {
    pub metric: String,
    pub unit: Option<String>,
    pub weighted_min: Option<f64>,
    pub weighted_max: Option<f64>,
    pub weighted_avg: Option<f64>,
}

/// Weighted mode: one table row and one quality-distribution bar series per summary
/// item, in payload order.
///
/// Rounding is half away from zero, decided on the shortest decimal form of the value
/// (`17.555` becomes `17.56`, `3.14159` becomes `3.14`). Each bar series has the four
/// fixed categories `Excellent, Good, Questionable, Poor`; absent buckets count zero.
/// A payload without a `data` array is malformed.
pub struct WeightedNormalizer;

impl Normalizer for WeightedNormalizer {
    type Row = WeightedRow;

    const KIND: NormalizerKind = NormalizerKind::Weighted;

    fn normalize(&self, payload: Value) -> Result<Normalized<WeightedRow>, NormalizeError> {
        let items = extract_items(Self::KIND, payload, Envelope::RequiredData)?;
        let summaries: Vec<WeightedSummaryItem> = decode_items(Self::KIND, items)?;

        let mut normalized = Normalized::default();
        for item in &summaries {
            let metric = capitalize(item.metric_name().unwrap_or_default());
            if !item.is_ordered() {
                warn!(
                    "Weighted summary for '{}' is out of order: min {:?}, avg {:?}, max {:?}",
                    metric, item.weighted_min, item.weighted_avg, item.weighted_max
                );
            }

            normalized.chart_series.push(DataSeries {
                label: metric.clone(),
                kind: SeriesKind::Bar,
                categories: QualityCode::labels(),
                values: item
                    .distribution()
                    .counts()
                    .iter()
                    .map(|&count| count as f64)
                    .collect(),
            });
            normalized.table_rows.push(WeightedRow {
                metric,
                unit: item.unit.clone(),
                weighted_min: item.weighted_min.map(round_stat),
                weighted_max: item.weighted_max.map(round_stat),
                weighted_avg: item.weighted_avg.map(round_stat),
            });
        }
        Ok(normalized)
    }
}

fn round_stat(value: f64) -> f64 {
    round_half_away_from_zero(value, STAT_DECIMALS)
}
