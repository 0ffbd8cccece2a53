//! Distinct values of categorical fields, for filter option lists.

use std::collections::BTreeSet;

use crate::models::{ACTIVE_STATUS, PayrollRecord, TextField};

/// Returns the sorted distinct non-blank values of a field.
pub fn distinct_values(records: &[PayrollRecord], field: TextField) -> Vec<String> {
    records
        .iter()
        .map(|record| record.text(field).trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Returns the distinct normalized statuses, `ATIVO` first.
///
/// ```
/// use folha_engine::engine::ordered_statuses;
/// use folha_engine::models::PayrollRecord;
///
/// let records: Vec<PayrollRecord> = ["cedido", "AFASTADO", "ativo", ""]
///     .into_iter()
///     .map(|s| PayrollRecord { situacao: s.to_string(), ..Default::default() })
///     .collect();
///
/// assert_eq!(
///     ordered_statuses(&records),
///     vec!["ATIVO", "AFASTADO", "CEDIDO", "NÃO INFORMADO"]
/// );
/// ```
pub fn ordered_statuses(records: &[PayrollRecord]) -> Vec<String> {
    let mut statuses: Vec<String> = records
        .iter()
        .map(PayrollRecord::normalized_status)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    if let Some(position) = statuses.iter().position(|status| status == ACTIVE_STATUS) {
        let active = statuses.remove(position);
        statuses.insert(0, active);
    }
    statuses
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_values_sorted_and_trimmed() {
        let records: Vec<PayrollRecord> = ["MEDICO ", "ENFERMEIRO", "", "MEDICO"]
            .into_iter()
            .map(|funcao| PayrollRecord {
                funcao: funcao.to_string(),
                ..Default::default()
            })
            .collect();
        assert_eq!(
            distinct_values(&records, TextField::Funcao),
            vec!["ENFERMEIRO", "MEDICO"]
        );
        assert!(distinct_values(&records, TextField::Area).is_empty());
    }

    #[test]
    fn test_statuses_without_active() {
        let records = vec![PayrollRecord {
            situacao: "cedido".to_string(),
            ..Default::default()
        }];
        assert_eq!(ordered_statuses(&records), vec!["CEDIDO"]);
        assert!(ordered_statuses(&[]).is_empty());
    }
}
