//! Dropdown option records served by `/locations` and `/metrics`, plus the static
//! table offered while the server has not supplied any.

use crate::utils::{opt_f64_or_string, opt_string_or_number, string_or_number};
use serde::{Deserialize, Serialize};

/// Offered as location choices until the server returns a non-empty list.
pub const DEFAULT_LOCATIONS: &[(&str, &str)] =
    &[("Irvine", "Irvine"), ("London", "London"), ("Tokyo", "Tokyo")];

/// Offered as metric choices until the server returns a non-empty list.
pub const DEFAULT_METRICS: &[(&str, &str)] = &[
    ("humidity", "Humidity"),
    ("precipitation", "Precipitation"),
    ("temperature", "Temperature"),
];

/// A location as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "opt_f64_or_string")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_or_string")]
    pub longitude: Option<f64>,
}

/// A metric as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A `(value, label)` pair ready for a select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    fn from_static(table: &[(&str, &str)]) -> Vec<Choice> {
        table
            .iter()
            .map(|(value, label)| Choice {
                value: value.to_string(),
                label: label.to_string(),
            })
            .collect()
    }
}

/// The dropdown lists loaded at session start.
///
/// A failed load leaves the corresponding list empty. The choice accessors fall back
/// to the static tables only while a list is empty; once the server has supplied
/// entries they are authoritative.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropdownOptions {
    pub locations: Vec<Location>,
    pub metrics: Vec<Metric>,
}

impl DropdownOptions {
    pub fn location_choices(&self) -> Vec<Choice> {
        if self.locations.is_empty() {
            return Choice::from_static(DEFAULT_LOCATIONS);
        }
        self.locations
            .iter()
            .map(|location| Choice {
                value: location.id.clone(),
                label: location.name.clone(),
            })
            .collect()
    }

    pub fn metric_choices(&self) -> Vec<Choice> {
        if self.metrics.is_empty() {
            return Choice::from_static(DEFAULT_METRICS);
        }
        self.metrics
            .iter()
            .map(|metric| Choice {
                value: metric.id.clone().unwrap_or_else(|| metric.name.clone()),
                label: metric
                    .display_name
                    .clone()
                    .unwrap_or_else(|| metric.name.clone()),
            })
            .collect()
    }
}
