//! Summary statistics models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Global summary statistics over a record set.
///
/// `Default` is the all-zero result returned for empty input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Distinct people, by normalized CPF with name fallback.
    pub unique_persons: usize,
    /// Distinct contracts, by matrícula.
    pub unique_contracts: usize,
    /// Every record in the input, outliers and aggregate rows included.
    pub total_records: usize,
    /// Sum of net pay.
    pub sum_net: Decimal,
    /// Sum of gross pay.
    pub sum_gross: Decimal,
    /// Sum of deductions.
    pub sum_deductions: Decimal,
    /// `sum_net / total_records`.
    pub mean_net: Decimal,
    /// Median of the strictly positive net values within the ceiling.
    pub median_net: Decimal,
    /// Largest strictly positive net value within the ceiling.
    pub max_net: Decimal,
    /// Smallest strictly positive net value within the ceiling.
    pub min_net: Decimal,
}

/// Statistics for one calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyStats {
    /// The `YYYY` year, or `NÃO INFORMADO`.
    pub year: String,
    /// Distinct people in the year.
    pub unique_persons: usize,
    /// Records in the year.
    pub total_records: usize,
    /// Sum of net pay.
    pub sum_net: Decimal,
    /// Sum of gross pay.
    pub sum_gross: Decimal,
    /// Sum of deductions.
    pub sum_deductions: Decimal,
    /// Mean net pay per record.
    pub mean_net: Decimal,
    /// Mean gross pay per record.
    pub mean_gross: Decimal,
    /// Mean deductions per record.
    pub mean_deductions: Decimal,
    /// Number of distinct competências with data.
    pub months_with_data: usize,
    /// The competências with data, sorted.
    pub competencias: Vec<String>,
}

/// Totals of one competência and their change from the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyChange {
    /// The `YYYY-MM` competência.
    pub competencia: String,
    /// Records in the competência.
    pub count: usize,
    /// Sum of net pay.
    pub liquido: Decimal,
    /// Sum of gross pay.
    pub vantagem: Decimal,
    /// Sum of deductions.
    pub desconto: Decimal,
    /// Change in net pay from the previous competência, in percent.
    ///
    /// `None` for the first competência and when the previous total is zero.
    pub net_change_pct: Option<Decimal>,
    /// Change in record count from the previous competência, in percent.
    pub count_change_pct: Option<Decimal>,
}

/// Month-over-month evolution of a record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyEvolution {
    /// One entry per competência, in chronological order.
    pub months: Vec<MonthlyChange>,
    /// Change in net pay from the first to the last competência, in percent.
    pub total_change_pct: Option<Decimal>,
    /// Competência with the highest net pay.
    pub highest_month: Option<String>,
    /// Competência with the lowest net pay.
    pub lowest_month: Option<String>,
}
