use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Rounds `value` to `places` decimal places, half away from zero.
///
/// The tie is decided on the shortest decimal representation of the float (the one
/// `Display` prints), so `17.555` rounds to `17.56` and `1.005` to `1.01`, even though
/// neither literal is exactly representable in binary. Non-finite values and values too
/// large to carry a fractional part are returned unchanged.
pub(crate) fn round_half_away_from_zero(value: f64, places: usize) -> f64 {
    if !value.is_finite() || value.abs() >= 1e15 {
        return value;
    }

    let repr = value.abs().to_string();
    let (whole, fraction) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    if fraction.len() <= places {
        return value;
    }

    let kept = format!("{whole}{}", &fraction[..places]);
    let Ok(mut units) = kept.parse::<i64>() else {
        return value;
    };
    if fraction.as_bytes()[places] >= b'5' {
        units += 1;
    }

    let rounded = units as f64 / 10f64.powi(places as i32);
    rounded.copysign(value)
}

/// Uppercases the first character and leaves the remainder untouched.
///
/// `"temperature"` becomes `"Temperature"`, `"wind speed"` becomes `"Wind speed"`.
pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Accepts ids the backend sends either as JSON numbers or as strings.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number id, found {other}"
        ))),
    }
}

/// Optional variant of [`string_or_number`]; `null` and absent map to `None`.
pub(crate) fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number id, found {other}"
        ))),
    }
}

/// Accepts decimals sent either as JSON numbers or as numeric strings (database
/// `DECIMAL` columns serialize as `"33.684600"`). `null` and absent map to `None`.
pub(crate) fn opt_f64_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => s.trim().parse::<f64>().map(Some).map_err(|_| {
            serde::de::Error::custom(format!("expected a decimal, found string '{s}'"))
        }),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a decimal number or string, found {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_two_places() {
        assert_eq!(round_half_away_from_zero(3.14159, 2), 3.14);
        assert_eq!(round_half_away_from_zero(10.123, 2), 10.12);
        assert_eq!(round_half_away_from_zero(25.987, 2), 25.99);
        assert_eq!(round_half_away_from_zero(17.555, 2), 17.56);
    }

    #[test]
    fn test_round_ties_go_away_from_zero() {
        assert_eq!(round_half_away_from_zero(1.005, 2), 1.01);
        assert_eq!(round_half_away_from_zero(-2.345, 2), -2.35);
        assert_eq!(round_half_away_from_zero(0.125, 2), 0.13);
    }

    #[test]
    fn test_round_leaves_short_values_alone() {
        assert_eq!(round_half_away_from_zero(2.0, 2), 2.0);
        assert_eq!(round_half_away_from_zero(-7.5, 2), -7.5);
        assert!(round_half_away_from_zero(f64::NAN, 2).is_nan());
        assert_eq!(round_half_away_from_zero(f64::INFINITY, 2), f64::INFINITY);
    }

    #[test]
    fn test_round_small_magnitudes() {
        assert_eq!(round_half_away_from_zero(0.004, 2), 0.0);
        assert_eq!(round_half_away_from_zero(0.0000001, 2), 0.0);
        assert_eq!(round_half_away_from_zero(99.999, 2), 100.0);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("temperature"), "Temperature");
        assert_eq!(capitalize("wind speed"), "Wind speed");
        assert_eq!(capitalize("pM2.5"), "PM2.5");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("ßeta"), "SSeta");
    }

    #[derive(Debug, Deserialize)]
    struct Coordinate {
        #[serde(default, deserialize_with = "opt_f64_or_string")]
        latitude: Option<f64>,
    }

    #[test]
    fn test_decimal_from_string_or_number() {
        let parse = |value: serde_json::Value| serde_json::from_value::<Coordinate>(value);
        assert_eq!(
            parse(serde_json::json!({"latitude": "33.684600"})).unwrap().latitude,
            Some(33.6846)
        );
        assert_eq!(
            parse(serde_json::json!({"latitude": -117.8265})).unwrap().latitude,
            Some(-117.8265)
        );
        assert_eq!(parse(serde_json::json!({"latitude": null})).unwrap().latitude, None);
        assert_eq!(parse(serde_json::json!({})).unwrap().latitude, None);
        assert!(parse(serde_json::json!({"latitude": "north"})).is_err());
        assert!(parse(serde_json::json!({"latitude": true})).is_err());
    }
}
