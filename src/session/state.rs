use crate::analysis::{AnalysisRouter, Route};
use crate::chart::{ChartConfig, ChartConfigBuilder};
use crate::error::EcoVisionError;
use crate::normalize::NormalizedData;
use crate::quality::{QualityIndicator, QualityReport};
use crate::query::{QueryBuilder, QueryParams};
use crate::types::filter_state::{AnalysisType, FilterField, FilterState};
use crate::types::options::DropdownOptions;
use log::{debug, error};

/// Identifies one issued request. Only the most recently issued ticket may write
/// to the display slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Everything needed to perform an apply outside the session lock.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub ticket: RequestTicket,
    /// Snapshot of the filters at apply time.
    pub filters: FilterState,
    pub route: Route,
    pub params: QueryParams,
}

/// The single "currently displayed dataset" slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DisplayState {
    /// Nothing applied yet, or cleared by a mode switch.
    #[default]
    Idle,
    /// The current request is outstanding.
    Loading,
    Ready(NormalizedData),
    /// The current request failed; the error has been logged.
    NoData,
}

impl DisplayState {
    pub fn data(&self) -> Option<&NormalizedData> {
        match self {
            DisplayState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DisplayState::Loading)
    }
}

/// What [`Session::commit`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Applied,
    /// A newer request (or a mode switch) superseded this one.
    Discarded,
}

/// Filter state plus the displayed result, driven by discrete events.
///
/// `Session` performs no I/O. An apply is split into [`Session::begin_apply`], which
/// issues a fresh [`RequestTicket`], and [`Session::commit`], which writes the
/// response only if that ticket is still the latest. Writes are therefore ordered by
/// request order, not completion order.
///
/// ```
/// use ecovision::{CommitOutcome, NormalizerKind, Session};
/// use serde_json::json;
///
/// let mut session = Session::new();
/// let first = session.begin_apply();
/// let second = session.begin_apply();
///
/// let late = NormalizerKind::Raw.normalize(json!({"data": []})).unwrap();
/// assert_eq!(session.commit(first.ticket, Ok(late)), CommitOutcome::Discarded);
/// assert!(session.display().is_loading());
/// assert!(session.is_current(second.ticket));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    filters: FilterState,
    display: DisplayState,
    options: DropdownOptions,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn options(&self) -> &DropdownOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: DropdownOptions) {
        self.options = options;
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Sets one filter field. Changing the analysis mode clears the displayed data.
    pub fn update_field(&mut self, field: FilterField, value: impl ToString) {
        let next = self.filters.clone().with_field(field, value);
        self.replace_filters(next);
    }

    pub fn clear_field(&mut self, field: FilterField) {
        let next = self.filters.clone().without_field(field);
        self.replace_filters(next);
    }

    pub fn switch_mode(&mut self, analysis_type: AnalysisType) {
        let next = self.filters.clone().with_analysis_type(analysis_type);
        self.replace_filters(next);
    }

    /// Restores default filters.
    pub fn reset(&mut self) {
        self.replace_filters(FilterState::default());
    }

    /// Replaces the filters wholesale.
    ///
    /// A change of analysis mode clears the displayed data and invalidates any
    /// outstanding request, so data of the previous mode is never shown again.
    pub fn replace_filters(&mut self, next: FilterState) {
        if next.analysis_type != self.filters.analysis_type {
            debug!(
                "Analysis mode {} -> {}, clearing results",
                self.filters.analysis_type, next.analysis_type
            );
            self.generation += 1;
            self.display = DisplayState::Idle;
        }
        self.filters = next;
    }

    /// Issues a new request for the current filters and marks the slot as loading.
    /// Any earlier outstanding request becomes stale.
    pub fn begin_apply(&mut self) -> PendingRequest {
        self.generation += 1;
        self.display = DisplayState::Loading;
        PendingRequest {
            ticket: RequestTicket(self.generation),
            filters: self.filters.clone(),
            route: AnalysisRouter::route(self.filters.analysis_type),
            params: QueryBuilder::build(&self.filters),
        }
    }

    /// Writes a response into the display slot if `ticket` is still current.
    /// Errors become [`DisplayState::NoData`] after being logged.
    pub fn commit(
        &mut self,
        ticket: RequestTicket,
        result: Result<NormalizedData, EcoVisionError>,
    ) -> CommitOutcome {
        if !self.is_current(ticket) {
            debug!(
                "Discarding response for request #{} (current is #{})",
                ticket.0, self.generation
            );
            return CommitOutcome::Discarded;
        }
        self.display = match result {
            Ok(data) => DisplayState::Ready(data),
            Err(e) => {
                error!("Request #{} failed ({:?}): {}", ticket.0, e.kind(), e);
                DisplayState::NoData
            }
        };
        CommitOutcome::Applied
    }

    /// Quality rollup of the displayed raw records; `NoData` in other modes.
    pub fn quality_report(&self) -> QualityReport {
        let records = self
            .display
            .data()
            .map(NormalizedData::raw_records)
            .unwrap_or_default();
        QualityIndicator::aggregate(records)
    }

    pub fn chart_configs(&self) -> Vec<ChartConfig> {
        self.display
            .data()
            .map(ChartConfigBuilder::build)
            .unwrap_or_default()
    }
}
