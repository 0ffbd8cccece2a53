//! Record validation.
//!
//! Data-quality checks for diagnostics screens. Nothing here blocks a
//! load or removes a record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{MoneyField, PayrollRecord};
use crate::normalize::CPF_LENGTH;

/// Tolerance of the `liquido = vantagem - desconto` check.
pub const CONSISTENCY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// A data-quality issue found in one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum RecordIssue {
    /// The name is blank.
    EmptyName,
    /// The CPF is not exactly 11 digits.
    InvalidCpf {
        /// The CPF as printed.
        cpf: String,
    },
    /// A monetary field is not numeric.
    InvalidAmount {
        /// The offending field.
        field: MoneyField,
    },
    /// A monetary field is negative.
    NegativeAmount {
        /// The offending field.
        field: MoneyField,
    },
    /// Net pay differs from gross minus deductions.
    Inconsistent {
        /// Net pay.
        liquido: Decimal,
        /// Gross pay.
        vantagem: Decimal,
        /// Deductions.
        desconto: Decimal,
    },
}

const MONEY_FIELDS: [MoneyField; 3] =
    [MoneyField::Vantagem, MoneyField::Desconto, MoneyField::Liquido];

/// Returns the data-quality issues of one record.
///
/// ```
/// use folha_engine::engine::{RecordIssue, validate_record};
/// use folha_engine::models::PayrollRecord;
/// use rust_decimal::Decimal;
///
/// let record = PayrollRecord {
///     nome: "ANA".to_string(),
///     cpf: "12345678901".to_string(),
///     vantagem: Some(Decimal::from(1000)),
///     desconto: Some(Decimal::from(200)),
///     liquido: Some(Decimal::from(800)),
///     ..Default::default()
/// };
/// assert!(validate_record(&record).is_empty());
///
/// let blank = PayrollRecord::default();
/// assert!(validate_record(&blank).contains(&RecordIssue::EmptyName));
/// ```
pub fn validate_record(record: &PayrollRecord) -> Vec<RecordIssue> {
    let mut issues = Vec::new();

    if record.nome.trim().is_empty() {
        issues.push(RecordIssue::EmptyName);
    }

    let cpf = record.cpf.trim();
    if cpf.len() != CPF_LENGTH || !cpf.bytes().all(|b| b.is_ascii_digit()) {
        issues.push(RecordIssue::InvalidCpf {
            cpf: record.cpf.clone(),
        });
    }

    for field in MONEY_FIELDS {
        match record.amount(field) {
            None => issues.push(RecordIssue::InvalidAmount { field }),
            Some(amount) if amount < Decimal::ZERO => {
                issues.push(RecordIssue::NegativeAmount { field })
            }
            Some(_) => {}
        }
    }

    if let (Some(liquido), Some(vantagem), Some(desconto)) =
        (record.liquido, record.vantagem, record.desconto)
    {
        let gap = vantagem
            .checked_sub(desconto)
            .and_then(|expected| liquido.checked_sub(expected))
            .map(|gap| gap.abs());
        if gap.is_none_or(|gap| gap > CONSISTENCY_TOLERANCE) {
            issues.push(RecordIssue::Inconsistent {
                liquido,
                vantagem,
                desconto,
            });
        }
    }

    issues
}

/// Returns the index and issues of every record with at least one issue.
///
/// Aggregate rows are not people and are not checked.
pub fn find_issues(records: &[PayrollRecord]) -> Vec<(usize, Vec<RecordIssue>)> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| !record.is_aggregate_row())
        .map(|(index, record)| (index, validate_record(record)))
        .filter(|(_, issues)| !issues.is_empty())
        .collect()
}
