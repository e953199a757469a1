//! The data-quality rollup shown beneath every view.
//!
//! It only ever looks at raw observations: in trend and weighted modes the loaded
//! record set is empty and the indicator reports [`QualityReport::NoData`].

use crate::types::climate_record::{ClimateRecord, QualityCode};
use serde::Serialize;

/// Share of records per quality bucket, in percent. The four values sum to 100
/// (up to floating-point error).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualitySummary {
    pub excellent_pct: f64,
    pub good_pct: f64,
    pub questionable_pct: f64,
    pub poor_pct: f64,
    pub total: usize,
}

impl QualitySummary {
    pub fn pct(&self, quality: QualityCode) -> f64 {
        match quality {
            QualityCode::Excellent => self.excellent_pct,
            QualityCode::Good => self.good_pct,
            QualityCode::Questionable => self.questionable_pct,
            QualityCode::Poor => self.poor_pct,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum QualityReport {
    /// No records are loaded; nothing to divide by.
    NoData,
    Summary(QualitySummary),
}

impl QualityReport {
    pub fn summary(&self) -> Option<&QualitySummary> {
        match self {
            QualityReport::NoData => None,
            QualityReport::Summary(summary) => Some(summary),
        }
    }
}

/// Computes the quality rollup of a record set.
///
/// ```
/// use ecovision::{QualityIndicator, QualityReport};
///
/// assert_eq!(QualityIndicator::aggregate(&[]), QualityReport::NoData);
/// ```
pub struct QualityIndicator;

impl QualityIndicator {
    pub fn aggregate(records: &[ClimateRecord]) -> QualityReport {
        if records.is_empty() {
            return QualityReport::NoData;
        }

        let mut counts = [0usize; 4];
        for record in records {
            counts[record.quality_code.index()] += 1;
        }
        let total = records.len();
        let pct = |quality: QualityCode| counts[quality.index()] as f64 * 100.0 / total as f64;

        QualityReport::Summary(QualitySummary {
            excellent_pct: pct(QualityCode::Excellent),
            good_pct: pct(QualityCode::Good),
            questionable_pct: pct(QualityCode::Questionable),
            poor_pct: pct(QualityCode::Poor),
            total,
        })
    }
}
