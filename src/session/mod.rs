//! The interactive layer: a pure [`Session`] reducer and the async [`Dashboard`]
//! that drives it against the API.

mod dashboard;
mod state;

pub use dashboard::Dashboard;
pub use state::{CommitOutcome, DisplayState, PendingRequest, RequestTicket, Session};
