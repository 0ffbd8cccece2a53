//! Statistics engine.
//!
//! Global summary statistics over a record set, plus the per-year
//! breakdown shown on the yearly summary page.

use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;
use tracing::warn;

use super::aggregate::{Dimension, aggregate_by_dimension};
use crate::models::{
    MoneyField, OUTLIER_CEILING, PayrollRecord, SummaryStats, YearlyStats, exceeds_ceiling, mean,
};
use crate::normalize::person_key;

/// Computes the global summary statistics of a record set.
///
/// - `total_records` counts every record, outliers and aggregate rows
///   included.
/// - Aggregate rows contribute to no other figure.
/// - Each sum skips values that are not numeric or whose magnitude
///   exceeds [`OUTLIER_CEILING`], field by field. Every skipped outlier
///   is logged.
/// - `mean_net` divides `sum_net` by `total_records`.
/// - Median, max and min only see net values in `(0, OUTLIER_CEILING]`.
///
/// # Examples
///
/// ```
/// use folha_engine::engine::compute_stats;
/// use folha_engine::models::PayrollRecord;
/// use rust_decimal::Decimal;
///
/// let records: Vec<PayrollRecord> = [100, 200, 300]
///     .into_iter()
///     .map(|v| PayrollRecord { liquido: Some(Decimal::from(v)), ..Default::default() })
///     .collect();
///
/// let stats = compute_stats(&records);
/// assert_eq!(stats.median_net, Decimal::from(200));
/// assert_eq!(stats.max_net, Decimal::from(300));
/// assert_eq!(stats.min_net, Decimal::from(100));
/// assert_eq!(stats.mean_net, Decimal::from(200));
/// ```
pub fn compute_stats(records: &[PayrollRecord]) -> SummaryStats {
    if records.is_empty() {
        return SummaryStats::default();
    }

    let mut persons = HashSet::new();
    let mut contracts = HashSet::new();
    let mut sum_net = Decimal::ZERO;
    let mut sum_gross = Decimal::ZERO;
    let mut sum_deductions = Decimal::ZERO;
    let mut net_values = Vec::new();

    for record in records.iter().filter(|record| !record.is_aggregate_row()) {
        if let Some(identity) = person_key(record) {
            persons.insert(identity);
        }
        let matricula = record.matricula.trim();
        if !matricula.is_empty() {
            contracts.insert(matricula);
        }

        sum_net += summable(record, MoneyField::Liquido);
        sum_gross += summable(record, MoneyField::Vantagem);
        sum_deductions += summable(record, MoneyField::Desconto);

        if let Some(net) = record.liquido {
            if net > Decimal::ZERO && net <= OUTLIER_CEILING {
                net_values.push(net);
            }
        }
    }

    net_values.sort();

    SummaryStats {
        unique_persons: persons.len(),
        unique_contracts: contracts.len(),
        total_records: records.len(),
        sum_net,
        sum_gross,
        sum_deductions,
        mean_net: mean(sum_net, records.len()),
        median_net: median(&net_values),
        max_net: net_values.last().copied().unwrap_or(Decimal::ZERO),
        min_net: net_values.first().copied().unwrap_or(Decimal::ZERO),
    }
}

/// Returns the field value when it may enter a sum, zero otherwise.
fn summable(record: &PayrollRecord, field: MoneyField) -> Decimal {
    match record.amount(field) {
        Some(amount) if exceeds_ceiling(amount) => {
            warn!(
                nome = %record.nome,
                competencia = %record.competencia,
                field = field.as_str(),
                value = %amount,
                "Value above outlier ceiling left out of statistics"
            );
            Decimal::ZERO
        }
        Some(amount) => amount,
        None => Decimal::ZERO,
    }
}

/// Median of an already sorted slice, zero when empty.
fn median(sorted: &[Decimal]) -> Decimal {
    let len = sorted.len();
    if len == 0 {
        return Decimal::ZERO;
    }
    let mid = len / 2;
    if len % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / Decimal::TWO
    } else {
        sorted[mid]
    }
}

/// Computes statistics per calendar year.
///
/// Built on the year aggregation, so records above the outlier ceiling
/// are left out of every figure of their year. Records without a
/// competência group under `NÃO INFORMADO`.
pub fn yearly_statistics(records: &[PayrollRecord]) -> BTreeMap<String, YearlyStats> {
    aggregate_by_dimension(records, Dimension::Year)
        .into_iter()
        .map(|(year, bucket)| {
            let stats = YearlyStats {
                year: year.clone(),
                unique_persons: bucket.unique_person_count(),
                total_records: bucket.count,
                sum_net: bucket.liquido,
                sum_gross: bucket.vantagem,
                sum_deductions: bucket.desconto,
                mean_net: bucket.mean_net(),
                mean_gross: bucket.mean_gross(),
                mean_deductions: bucket.mean_deductions(),
                months_with_data: bucket.competencias.len(),
                competencias: bucket.competencias.into_iter().collect(),
            };
            (year, stats)
        })
        .collect()
}
