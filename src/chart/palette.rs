use serde::Serialize;

const SATURATION_PCT: u8 = 70;
const LIGHTNESS_PCT: u8 = 50;
const FILL_ALPHA: &str = "0.7";
const STROKE_ALPHA: &str = "1.0";

/// Fill and stroke color of one series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesColor {
    pub hue: u16,
    pub fill: String,
    pub stroke: String,
}

/// Hue for series `index` of `total`: `round(index * 360 / total)` degrees.
///
/// Hues are evenly spaced around the wheel and depend only on position, so the same
/// input order always yields the same palette. `total == 0` is treated as one series.
///
/// ```
/// use ecovision::hue_for;
///
/// let hues: Vec<u16> = (0..4).map(|i| hue_for(i, 4)).collect();
/// assert_eq!(hues, vec![0, 90, 180, 270]);
/// assert_eq!(hue_for(0, 1), 0);
/// ```
pub fn hue_for(index: usize, total: usize) -> u16 {
    let total = total.max(1);
    (index as f64 * 360.0 / total as f64).round() as u16
}

pub fn series_color(index: usize, total: usize) -> SeriesColor {
    let hue = hue_for(index, total);
    SeriesColor {
        hue,
        fill: hsla(hue, FILL_ALPHA),
        stroke: hsla(hue, STROKE_ALPHA),
    }
}

/// Colors for `total` series, recomputed on every call.
pub fn palette(total: usize) -> Vec<SeriesColor> {
    (0..total).map(|index| series_color(index, total)).collect()
}

fn hsla(hue: u16, alpha: &str) -> String {
    format!("hsla({hue}, {SATURATION_PCT}%, {LIGHTNESS_PCT}%, {alpha})")
}
