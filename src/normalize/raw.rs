use crate::normalize::error::NormalizeError;
use crate::normalize::{
    decode_items, extract_items, DataSeries, Envelope, Normalized, Normalizer, NormalizerKind,
    SeriesKind,
};
use crate::types::climate_record::{ClimateRecord, QualityCode};
use serde_json::Value;

/// Label of the record-count-by-quality series.
pub(crate) const QUALITY_SERIES_LABEL: &str = "Records";

/// Raw mode: records pass through untouched (no rounding), and feed two charts.
///
/// * one line series per metric (value over time), in the order metrics first appear;
/// * one bar series counting records per quality bucket, always four categories.
pub struct RawNormalizer;

impl Normalizer for RawNormalizer {
    type Row = ClimateRecord;

    const KIND: NormalizerKind = NormalizerKind::Raw;

    fn normalize(&self, payload: Value) -> Result<Normalized<ClimateRecord>, NormalizeError> {
        let items = extract_items(Self::KIND, payload, Envelope::OptionalData)?;
        let records: Vec<ClimateRecord> = decode_items(Self::KIND, items)?;

        let mut chart_series = metric_line_series(&records);
        chart_series.push(quality_bar_series(&records));

        Ok(Normalized {
            table_rows: records,
            chart_series,
        })
    }
}

fn metric_line_series(records: &[ClimateRecord]) -> Vec<DataSeries> {
    let mut series: Vec<(String, DataSeries)> = Vec::new();
    for record in records {
        let position = match series.iter().position(|(metric, _)| *metric == record.metric) {
            Some(position) => position,
            None => {
                series.push((
                    record.metric.clone(),
                    DataSeries {
                        label: record.metric_label(),
                        kind: SeriesKind::Line,
                        categories: Vec::new(),
                        values: Vec::new(),
                    },
                ));
                series.len() - 1
            }
        };
        let line = &mut series[position].1;
        line.categories.push(record.timestamp.clone());
        line.values.push(record.value);
    }
    series.into_iter().map(|(_, line)| line).collect()
}

fn quality_bar_series(records: &[ClimateRecord]) -> DataSeries {
    let mut counts = [0u64; 4];
    for record in records {
        counts[record.quality_code.index()] += 1;
    }
    DataSeries {
        label: QUALITY_SERIES_LABEL.to_string(),
        kind: SeriesKind::Bar,
        categories: QualityCode::labels(),
        values: counts.iter().map(|&count| count as f64).collect(),
    }
}
