//! Turns a [`FilterState`] into the minimal set of query parameters the analysis
//! endpoints accept.

use crate::types::filter_state::{FilterField, FilterState};
use std::fmt;

/// Ordered `(key, value)` pairs ready for URL encoding.
///
/// Keys are the transport (snake_case) names. Order follows [`FilterField::ALL`]:
/// `location_id`, `start_date`, `end_date`, `metric`, `quality_threshold`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_pairs(&self) -> &[(&'static str, String)] {
        &self.0
    }

    /// The `application/x-www-form-urlencoded` rendering, without a leading `?`.
    /// Empty when no filter is set.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.iter() {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Builds [`QueryParams`] from a filter snapshot.
///
/// A field is emitted iff it is set and non-empty. `"0"` is a legitimate value (for
/// example a quality threshold of zero) and is always emitted. No validation happens
/// here: date ordering and metric existence are checked by the backend.
///
/// # Examples
///
/// ```
/// use ecovision::{AnalysisType, FilterField, FilterState, QueryBuilder};
///
/// let filters = FilterState::default()
///     .with_field(FilterField::LocationId, "Irvine")
///     .with_field(FilterField::Metric, "temperature")
///     .with_field(FilterField::StartDate, "")
///     .with_analysis_type(AnalysisType::Weighted);
///
/// let params = QueryBuilder::build(&filters);
/// assert_eq!(params.to_query_string(), "location_id=Irvine&metric=temperature");
/// ```
pub struct QueryBuilder;

impl QueryBuilder {
    pub fn build(filters: &FilterState) -> QueryParams {
        let pairs = FilterField::ALL
            .iter()
            .filter_map(|field| {
                let key = field.query_key()?;
                let value = filters.value(*field)?;
                (!value.is_empty()).then(|| (key, value.to_string()))
            })
            .collect();
        QueryParams(pairs)
    }
}
