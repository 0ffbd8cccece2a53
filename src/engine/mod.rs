//! Pure engine functions over loaded records.
//!
//! Data flows from the filter into aggregation, statistics and top-N
//! selection. Every function here is synchronous, takes its input by
//! reference and returns a fresh value.

mod aggregate;
mod distinct;
mod evolution;
mod filter;
mod statistics;
mod top_n;
mod validation;

pub use aggregate::{Dimension, aggregate_by, aggregate_by_dimension};
pub use distinct::{distinct_values, ordered_statuses};
pub use evolution::monthly_evolution;
pub use filter::filter_records;
pub use statistics::{compute_stats, yearly_statistics};
pub use top_n::{TopEntry, top_n};
pub use validation::{CONSISTENCY_TOLERANCE, RecordIssue, find_issues, validate_record};
