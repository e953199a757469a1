pub mod climate_record;
pub mod filter_state;
pub mod options;
pub mod trend_point;
pub mod weighted_summary;
