//! Month-over-month evolution.

use rust_decimal::Decimal;

use super::aggregate::{Dimension, aggregate_by_dimension};
use crate::models::{MonthlyChange, MonthlyEvolution, NOT_INFORMED, PayrollRecord};

/// Compares the totals of consecutive competências.
///
/// Built on the competência aggregation, so outliers are left out the same
/// way. Records without a competência are ignored.
///
/// # Examples
///
/// ```
/// use folha_engine::engine::monthly_evolution;
/// use folha_engine::models::PayrollRecord;
/// use rust_decimal::Decimal;
///
/// let records: Vec<PayrollRecord> = [("2025-01", 1000), ("2025-02", 1100)]
///     .into_iter()
///     .map(|(competencia, net)| PayrollRecord {
///         competencia: competencia.to_string(),
///         liquido: Some(Decimal::from(net)),
///         ..Default::default()
///     })
///     .collect();
///
/// let evolution = monthly_evolution(&records);
/// assert_eq!(evolution.months[1].net_change_pct, Some(Decimal::from(10)));
/// assert_eq!(evolution.highest_month.as_deref(), Some("2025-02"));
/// ```
pub fn monthly_evolution(records: &[PayrollRecord]) -> MonthlyEvolution {
    let mut months: Vec<MonthlyChange> = Vec::new();

    for (competencia, bucket) in aggregate_by_dimension(records, Dimension::Competencia) {
        if competencia == NOT_INFORMED {
            continue;
        }
        let previous = months.last();
        let net_change_pct =
            previous.and_then(|previous| percent_change(previous.liquido, bucket.liquido));
        let count_change_pct = previous.and_then(|previous| {
            percent_change(Decimal::from(previous.count), Decimal::from(bucket.count))
        });

        months.push(MonthlyChange {
            competencia,
            count: bucket.count,
            liquido: bucket.liquido,
            vantagem: bucket.vantagem,
            desconto: bucket.desconto,
            net_change_pct,
            count_change_pct,
        });
    }

    let total_change_pct = match (months.first(), months.last()) {
        (Some(first), Some(last)) => percent_change(first.liquido, last.liquido),
        _ => None,
    };

    // Ties go to the earliest competência.
    let highest_month = months
        .iter()
        .fold(None::<&MonthlyChange>, |best, month| match best {
            Some(best) if best.liquido >= month.liquido => Some(best),
            _ => Some(month),
        })
        .map(|month| month.competencia.clone());
    let lowest_month = months
        .iter()
        .fold(None::<&MonthlyChange>, |best, month| match best {
            Some(best) if best.liquido <= month.liquido => Some(best),
            _ => Some(month),
        })
        .map(|month| month.competencia.clone());

    MonthlyEvolution {
        months,
        total_change_pct,
        highest_month,
        lowest_month,
    }
}

/// Percent change from `previous` to `current`, `None` when `previous` is zero.
fn percent_change(previous: Decimal, current: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        return None;
    }
    current
        .checked_sub(previous)?
        .checked_div(previous)?
        .checked_mul(Decimal::ONE_HUNDRED)
}
