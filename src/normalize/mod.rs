//! Response normalization: turns the three structurally different analysis payloads
//! into a common `{table_rows, chart_series}` shape.
//!
//! Each analysis mode has its own strategy implementing [`Normalizer`]:
//! [`RawNormalizer`], [`TrendNormalizer`] and [`WeightedNormalizer`]. The
//! [`NormalizerKind`] chosen by the [`crate::AnalysisRouter`] dispatches an untyped
//! payload to the right one and wraps the result in [`NormalizedData`].

pub mod error;
mod raw;
mod trend;
mod weighted;

pub use raw::RawNormalizer;
pub use trend::TrendNormalizer;
pub use weighted::{WeightedNormalizer, WeightedRow};

use crate::normalize::error::NormalizeError;
use crate::types::climate_record::ClimateRecord;
use crate::types::trend_point::TrendPoint;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// How a series is meant to be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    Line,
    Bar,
}

/// One uncolored data series: `values[i]` belongs to `categories[i]`.
///
/// Colors are assigned later by [`crate::ChartConfigBuilder`], from the series'
/// position only.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSeries {
    pub label: String,
    pub kind: SeriesKind,
    pub categories: Vec<String>,
    pub values: Vec<f64>,
}

/// Output of a normalizer: rows for the table view and series for the charts.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<R> {
    pub table_rows: Vec<R>,
    pub chart_series: Vec<DataSeries>,
}

impl<R> Default for Normalized<R> {
    fn default() -> Self {
        Self {
            table_rows: Vec::new(),
            chart_series: Vec::new(),
        }
    }
}

/// A response-shaping strategy for one analysis mode.
pub trait Normalizer {
    type Row;

    const KIND: NormalizerKind;

    /// Shapes a backend payload. Fails with [`NormalizeError`] when the payload lacks
    /// the data array this mode requires or an item does not decode.
    fn normalize(&self, payload: Value) -> Result<Normalized<Self::Row>, NormalizeError>;
}

/// Identifies a normalizer strategy; the runtime counterpart of [`Normalizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalizerKind {
    Raw,
    Trend,
    Weighted,
}

impl NormalizerKind {
    /// Runs the strategy this kind names.
    pub fn normalize(&self, payload: Value) -> Result<NormalizedData, NormalizeError> {
        Ok(match self {
            NormalizerKind::Raw => NormalizedData::Raw(RawNormalizer.normalize(payload)?),
            NormalizerKind::Trend => NormalizedData::Trend(TrendNormalizer.normalize(payload)?),
            NormalizerKind::Weighted => {
                NormalizedData::Weighted(WeightedNormalizer.normalize(payload)?)
            }
        })
    }
}

impl fmt::Display for NormalizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizerKind::Raw => write!(f, "raw"),
            NormalizerKind::Trend => write!(f, "trend"),
            NormalizerKind::Weighted => write!(f, "weighted"),
        }
    }
}

/// The normalized result of one analysis request.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedData {
    Raw(Normalized<ClimateRecord>),
    Trend(Normalized<TrendPoint>),
    Weighted(Normalized<WeightedRow>),
}

impl NormalizedData {
    pub fn kind(&self) -> NormalizerKind {
        match self {
            NormalizedData::Raw(_) => NormalizerKind::Raw,
            NormalizedData::Trend(_) => NormalizerKind::Trend,
            NormalizedData::Weighted(_) => NormalizerKind::Weighted,
        }
    }

    pub fn chart_series(&self) -> &[DataSeries] {
        match self {
            NormalizedData::Raw(n) => &n.chart_series,
            NormalizedData::Trend(n) => &n.chart_series,
            NormalizedData::Weighted(n) => &n.chart_series,
        }
    }

    /// The raw observations, empty unless this is a raw-mode result.
    pub fn raw_records(&self) -> &[ClimateRecord] {
        match self {
            NormalizedData::Raw(n) => &n.table_rows,
            _ => &[],
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            NormalizedData::Raw(n) => n.table_rows.len(),
            NormalizedData::Trend(n) => n.table_rows.len(),
            NormalizedData::Weighted(n) => n.table_rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

/// Where a strategy expects its items inside the payload.
enum Envelope {
    /// `{data: [...]}`; a missing or `null` `data` reads as an empty list.
    OptionalData,
    /// `{data: [...]}`; `data` must be present.
    RequiredData,
    /// `{data: [...]}` or a bare `[...]`.
    DataOrArray,
}

fn extract_items(
    normalizer: NormalizerKind,
    payload: Value,
    envelope: Envelope,
) -> Result<Vec<Value>, NormalizeError> {
    let malformed = |reason: &str| NormalizeError::MalformedResponse {
        normalizer,
        reason: reason.to_string(),
    };

    match (payload, envelope) {
        (Value::Array(items), Envelope::DataOrArray) => Ok(items),
        (Value::Object(mut map), envelope) => match (map.remove("data"), envelope) {
            (Some(Value::Array(items)), _) => Ok(items),
            (None | Some(Value::Null), Envelope::OptionalData) => Ok(Vec::new()),
            (None | Some(Value::Null), _) => Err(malformed("missing top-level `data` array")),
            (Some(_), _) => Err(malformed("top-level `data` is not an array")),
        },
        _ => Err(malformed("expected a JSON object envelope")),
    }
}

fn decode_items<T: DeserializeOwned>(
    normalizer: NormalizerKind,
    items: Vec<Value>,
) -> Result<Vec<T>, NormalizeError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|source| NormalizeError::MalformedItem {
                normalizer,
                index,
                source,
            })
        })
        .collect()
}
