//! Visual encodings derived from normalized data: per-series colors and chart
//! configurations.

mod config;
mod palette;

pub use config::{AxisConfig, ChartConfig, ChartConfigBuilder, ChartKind, ChartSeriesConfig};
pub use palette::{hue_for, palette, series_color, SeriesColor};
