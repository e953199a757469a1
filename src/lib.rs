mod analysis;
mod chart;
mod config;
mod ecovision;
mod error;
mod fetch;
mod normalize;
mod quality;
mod query;
mod session;
mod types;
mod utils;

pub use ecovision::*;
pub use error::{EcoVisionError, ErrorKind};

pub use analysis::{AnalysisRouter, Endpoint, Route};
pub use config::ClientConfig;
pub use query::{QueryBuilder, QueryParams};
pub use quality::{QualityIndicator, QualityReport, QualitySummary};

pub use normalize::{
    DataSeries, Normalized, NormalizedData, Normalizer, NormalizerKind, RawNormalizer, SeriesKind,
    TrendNormalizer, WeightedNormalizer, WeightedRow,
};
pub use chart::{
    hue_for, palette, series_color, AxisConfig, ChartConfig, ChartConfigBuilder, ChartKind,
    ChartSeriesConfig, SeriesColor,
};

pub use session::{CommitOutcome, Dashboard, DisplayState, PendingRequest, RequestTicket, Session};

pub use types::climate_record::{ClimateRecord, QualityCode};
pub use types::filter_state::{AnalysisType, FilterField, FilterState};
pub use types::options::{Choice, DropdownOptions, Location, Metric};
pub use types::trend_point::TrendPoint;
pub use types::weighted_summary::{QualityDistribution, WeightedSummaryItem};

pub use fetch::error::FetchError;
pub use normalize::error::NormalizeError;
