//! Aggregate bucket model.
//!
//! Buckets are produced fresh by every aggregation call; nothing in them
//! survives between calls.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::normalize::PersonKey;

/// A person on leave, kept for drill-down display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveReason {
    /// Display name of the person.
    pub nome: String,
    /// The leave reason as printed in the source.
    pub motivo: String,
}

/// Running totals for one group key.
///
/// # Example
///
/// ```
/// use folha_engine::models::AggregateBucket;
/// use rust_decimal::Decimal;
///
/// let bucket = AggregateBucket::new("HEPR".to_string());
/// assert_eq!(bucket.count, 0);
/// assert_eq!(bucket.liquido, Decimal::ZERO);
/// assert_eq!(bucket.unique_person_count(), 0);
/// assert_eq!(bucket.mean_net(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateBucket<K> {
    /// The group key value.
    pub key: K,
    /// Sum of net pay.
    pub liquido: Decimal,
    /// Sum of gross pay.
    pub vantagem: Decimal,
    /// Sum of deductions.
    pub desconto: Decimal,
    /// Number of records in the bucket (not unique people).
    pub count: usize,
    /// Identities of the people in the bucket.
    pub unique_persons: BTreeSet<PersonKey>,
    /// Names of contributing records, aggregate rows excluded.
    pub names: Vec<String>,
    /// Competências seen in the bucket.
    pub competencias: BTreeSet<String>,
    /// Leave reasons of contributing records on leave.
    pub leave_reasons: Vec<LeaveReason>,
}

impl<K> AggregateBucket<K> {
    /// Creates an empty bucket for a key.
    pub fn new(key: K) -> Self {
        Self {
            key,
            liquido: Decimal::ZERO,
            vantagem: Decimal::ZERO,
            desconto: Decimal::ZERO,
            count: 0,
            unique_persons: BTreeSet::new(),
            names: Vec::new(),
            competencias: BTreeSet::new(),
            leave_reasons: Vec::new(),
        }
    }

    /// Returns the number of distinct people in the bucket.
    pub fn unique_person_count(&self) -> usize {
        self.unique_persons.len()
    }

    /// Returns the mean net pay per record, zero for an empty bucket.
    pub fn mean_net(&self) -> Decimal {
        mean(self.liquido, self.count)
    }

    /// Returns the mean gross pay per record, zero for an empty bucket.
    pub fn mean_gross(&self) -> Decimal {
        mean(self.vantagem, self.count)
    }

    /// Returns the mean deductions per record, zero for an empty bucket.
    pub fn mean_deductions(&self) -> Decimal {
        mean(self.desconto, self.count)
    }
}

pub(crate) fn mean(sum: Decimal, count: usize) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        sum / Decimal::from(count)
    }
}
