//! Core data models for the payroll aggregation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod bucket;
mod competencia;
mod criteria;
mod load_report;
mod record;
mod statistics;

pub(crate) use bucket::mean;
pub use bucket::{AggregateBucket, LeaveReason};
pub use competencia::{Competencia, period_label};
pub(crate) use criteria::active;
pub use criteria::FilterCriteria;
pub use load_report::{FileLoadReport, FileLoadStatus, LoadOutcome};
pub(crate) use record::or_not_informed;
pub use record::{
    ACTIVE_STATUS, AGGREGATE_ROW_SENTINEL, MoneyField, NOT_INFORMED, ON_LEAVE_STATUS,
    OUTLIER_CEILING, PayrollRecord, TextField, coerce_amount, exceeds_ceiling,
};
pub use statistics::{MonthlyChange, MonthlyEvolution, SummaryStats, YearlyStats};
