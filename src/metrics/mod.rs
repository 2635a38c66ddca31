pub mod aggregator;

pub use aggregator::{metric_value, snapshot, snapshot_in_year};
