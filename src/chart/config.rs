use crate::chart::palette::palette;
use crate::normalize::{DataSeries, NormalizedData, SeriesKind};
use serde::Serialize;

pub(crate) const CLIMATE_TRENDS_TITLE: &str = "Climate Trends";
pub(crate) const QUALITY_TITLE: &str = "Quality Distribution";
const COUNT_LABEL: &str = "Count";

/// One colored dataset of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeriesConfig {
    pub label: String,
    pub values: Vec<f64>,
    pub categories: Vec<String>,
    pub fill_color: String,
    pub stroke_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisConfig {
    pub begin_at_zero: bool,
    pub title: Option<String>,
}

/// Everything a renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub title: String,
    pub show_legend: bool,
    pub y_axis: AxisConfig,
    pub datasets: Vec<ChartSeriesConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

impl From<SeriesKind> for ChartKind {
    fn from(kind: SeriesKind) -> Self {
        match kind {
            SeriesKind::Line => ChartKind::Line,
            SeriesKind::Bar => ChartKind::Bar,
        }
    }
}

/// Derives chart configurations from normalized data.
///
/// Colors come from [`crate::palette`]: within each group of series, series `i`
/// of `n` gets hue `round(i * 360 / n)`. Nothing is cached; the palette is rebuilt from
/// the series order on every call.
///
/// * raw data yields a "Climate Trends" line chart (one dataset per metric) and a
///   "Quality Distribution" bar chart of record counts;
/// * weighted data yields one "Quality Distribution: <Metric>" bar chart per metric;
/// * trend data yields no charts.
///
/// Quality bar charts hide the legend and force the y axis to start at zero with the
/// title "Count".
///
/// ```
/// use ecovision::{AxisConfig, ChartConfigBuilder, ChartKind, NormalizerKind};
/// use serde_json::json;
///
/// let data = NormalizerKind::Weighted
///     .normalize(json!({"data": [{"metric": "humidity", "quality_distribution": {"good": 4}}]}))
///     .unwrap();
/// let charts = ChartConfigBuilder::build(&data);
///
/// assert_eq!(charts[0].kind, ChartKind::Bar);
/// assert_eq!(charts[0].title, "Quality Distribution: Humidity");
/// assert_eq!(
///     charts[0].y_axis,
///     AxisConfig { begin_at_zero: true, title: Some("Count".to_string()) }
/// );
/// assert_eq!(charts[0].datasets[0].fill_color, ecovision::series_color(0, 1).fill);
/// ```
pub struct ChartConfigBuilder;

impl ChartConfigBuilder {
    pub fn build(data: &NormalizedData) -> Vec<ChartConfig> {
        match data {
            NormalizedData::Raw(normalized) => Self::raw_charts(&normalized.chart_series),
            NormalizedData::Weighted(normalized) => {
                Self::quality_distribution_charts(&normalized.chart_series)
            }
            NormalizedData::Trend(_) => Vec::new(),
        }
    }

    /// The two raw-mode charts, built from the raw normalizer's series.
    pub fn raw_charts(series: &[DataSeries]) -> Vec<ChartConfig> {
        let lines: Vec<&DataSeries> = series
            .iter()
            .filter(|s| s.kind == SeriesKind::Line)
            .collect();
        let bars: Vec<&DataSeries> = series
            .iter()
            .filter(|s| s.kind == SeriesKind::Bar)
            .collect();

        let trends = ChartConfig {
            kind: ChartKind::Line,
            title: CLIMATE_TRENDS_TITLE.to_string(),
            show_legend: true,
            y_axis: AxisConfig {
                begin_at_zero: false,
                title: None,
            },
            datasets: colored(&lines),
        };
        let quality = ChartConfig {
            kind: ChartKind::Bar,
            title: QUALITY_TITLE.to_string(),
            show_legend: false,
            y_axis: count_axis(),
            datasets: colored(&bars),
        };
        vec![trends, quality]
    }

    /// One bar chart per series, colored by the series' position among all of them.
    pub fn quality_distribution_charts(series: &[DataSeries]) -> Vec<ChartConfig> {
        let colors = palette(series.len());
        series
            .iter()
            .zip(colors)
            .map(|(s, color)| ChartConfig {
                kind: ChartKind::from(s.kind),
                title: format!("{QUALITY_TITLE}: {}", s.label),
                show_legend: false,
                y_axis: count_axis(),
                datasets: vec![ChartSeriesConfig {
                    label: COUNT_LABEL.to_string(),
                    values: s.values.clone(),
                    categories: s.categories.clone(),
                    fill_color: color.fill,
                    stroke_color: color.stroke,
                }],
            })
            .collect()
    }
}

fn count_axis() -> AxisConfig {
    AxisConfig {
        begin_at_zero: true,
        title: Some(COUNT_LABEL.to_string()),
    }
}

fn colored(series: &[&DataSeries]) -> Vec<ChartSeriesConfig> {
    series
        .iter()
        .zip(palette(series.len()))
        .map(|(s, color)| ChartSeriesConfig {
            label: s.label.clone(),
            values: s.values.clone(),
            categories: s.categories.clone(),
            fill_color: color.fill,
            stroke_color: color.stroke,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::NormalizerKind;
    use serde_json::json;

    fn weighted(metrics: &[&str]) -> NormalizedData {
        let items: Vec<_> = metrics
            .iter()
            .map(|m| json!({"metric": m, "quality_distribution": {"good": 2}}))
            .collect();
        NormalizerKind::Weighted
            .normalize(json!({ "data": items }))
            .unwrap()
    }

    #[test]
    fn test_weighted_chart_per_metric() {
        let charts = ChartConfigBuilder::build(&weighted(&["temperature", "humidity"]));
        assert_eq!(charts.len(), 2);

        let first = &charts[0];
        assert_eq!(first.kind, ChartKind::Bar);
        assert_eq!(first.title, "Quality Distribution: Temperature");
        assert!(!first.show_legend);
        assert_eq!(
            first.y_axis,
            AxisConfig {
                begin_at_zero: true,
                title: Some("Count".into())
            }
        );
        assert_eq!(first.datasets[0].label, "Count");
        assert_eq!(first.datasets[0].values, vec![0.0, 2.0, 0.0, 0.0]);
        assert_eq!(charts[1].title, "Quality Distribution: Humidity");
    }

    #[test]
    fn test_weighted_hues_follow_payload_order() {
        let charts = ChartConfigBuilder::build(&weighted(&["a", "b", "c", "d"]));
        let fills: Vec<_> = charts.iter().map(|c| c.datasets[0].fill_color.as_str()).collect();
        assert_eq!(
            fills,
            vec![
                "hsla(0, 70%, 50%, 0.7)",
                "hsla(90, 70%, 50%, 0.7)",
                "hsla(180, 70%, 50%, 0.7)",
                "hsla(270, 70%, 50%, 0.7)",
            ]
        );

        let reordered = ChartConfigBuilder::build(&weighted(&["d", "a", "b", "c"]));
        assert_eq!(reordered[0].title, "Quality Distribution: D");
        assert_eq!(reordered[0].datasets[0].stroke_color, "hsla(0, 70%, 50%, 1.0)");
    }

    #[test]
    fn test_raw_charts() {
        let data = NormalizerKind::Raw
            .normalize(json!({"data": [
                {"location_id": "Tokyo", "metric": "temperature", "timestamp": "2025-01-01",
                 "value": 4.0, "quality_code": "good"},
                {"location_id": "Tokyo", "metric": "humidity", "timestamp": "2025-01-01",
                 "value": 55.0, "quality_code": "questionable"}
            ]}))
            .unwrap();
        let charts = ChartConfigBuilder::build(&data);
        assert_eq!(charts.len(), 2);

        let trends = &charts[0];
        assert_eq!(trends.kind, ChartKind::Line);
        assert_eq!(trends.title, CLIMATE_TRENDS_TITLE);
        assert!(trends.show_legend);
        let hues: Vec<_> = trends.datasets.iter().map(|d| d.stroke_color.as_str()).collect();
        assert_eq!(hues, vec!["hsla(0, 70%, 50%, 1.0)", "hsla(180, 70%, 50%, 1.0)"]);

        let quality = &charts[1];
        assert_eq!(quality.title, QUALITY_TITLE);
        assert!(quality.y_axis.begin_at_zero);
        assert_eq!(quality.datasets.len(), 1);
        assert_eq!(quality.datasets[0].values, vec![0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_trend_has_no_charts() {
        let data = NormalizerKind::Trend.normalize(json!({"data": []})).unwrap();
        assert!(ChartConfigBuilder::build(&data).is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let charts = ChartConfigBuilder::build(&weighted(&["temperature"]));
        let value = serde_json::to_value(&charts[0]).unwrap();
        assert_eq!(value["showLegend"], json!(false));
        assert_eq!(value["yAxis"]["beginAtZero"], json!(true));
        assert_eq!(value["datasets"][0]["fillColor"], json!("hsla(0, 70%, 50%, 0.7)"));
    }
}
