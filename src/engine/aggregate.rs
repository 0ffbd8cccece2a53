//! Aggregation engine.
//!
//! One generic reducer, [`aggregate_by`], groups records under a key
//! computed per record. [`Dimension`] provides the key functions of the
//! standard dashboard groupings.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{
    AggregateBucket, LeaveReason, MoneyField, NOT_INFORMED, ON_LEAVE_STATUS, PayrollRecord,
    exceeds_ceiling, or_not_informed,
};
use crate::normalize::{person_key, resolve_department};

/// A standard grouping dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// The `YYYY-MM` competência.
    Competencia,
    /// The `YYYY` year of the competência.
    Year,
    /// The resolved canonical department.
    Department,
    /// The contract type (`vinculo`).
    ContractType,
    /// The normalized status (`situacao`).
    Status,
    /// The role (`funcao`).
    Role,
    /// Role and career level, keyed `"{funcao}_{nivel}"`.
    RoleLevel,
}

impl Dimension {
    /// Returns the group key of a record along this dimension.
    ///
    /// Blank categorical values group under `NÃO INFORMADO`. Department
    /// keys are resolved through the alias table, and records without a
    /// resolvable department yield `None`.
    ///
    /// ```
    /// use folha_engine::engine::Dimension;
    /// use folha_engine::models::PayrollRecord;
    ///
    /// let record = PayrollRecord {
    ///     lotacao_normalizada: "PORTUGAL RAMALHO".to_string(),
    ///     funcao: "MEDICO".to_string(),
    ///     nivel: "III".to_string(),
    ///     ..Default::default()
    /// };
    ///
    /// assert_eq!(Dimension::Department.key(&record).as_deref(), Some("HEPR"));
    /// assert_eq!(Dimension::RoleLevel.key(&record).as_deref(), Some("MEDICO_III"));
    /// assert_eq!(Dimension::Status.key(&record).as_deref(), Some("NÃO INFORMADO"));
    /// ```
    pub fn key(self, record: &PayrollRecord) -> Option<String> {
        let key = match self {
            Dimension::Competencia => or_not_informed(&record.competencia),
            Dimension::Year => record
                .year()
                .map_or_else(|| NOT_INFORMED.to_string(), str::to_string),
            Dimension::Department => {
                return resolve_department(
                    record.department_label(),
                    record.original_department_label(),
                );
            }
            Dimension::ContractType => or_not_informed(&record.vinculo),
            Dimension::Status => record.normalized_status(),
            Dimension::Role => or_not_informed(&record.funcao),
            Dimension::RoleLevel => format!(
                "{}_{}",
                or_not_informed(&record.funcao),
                or_not_informed(&record.nivel)
            ),
        };
        Some(key)
    }
}

/// Groups records by `key_fn` and accumulates one bucket per key.
///
/// For each record:
///
/// 1. Non-numeric amounts count as zero.
/// 2. A record with any amount whose magnitude is above
///    [`OUTLIER_CEILING`](crate::models::OUTLIER_CEILING) is left out
///    entirely.
/// 3. A record whose key is `None` is left out.
/// 4. Sums and the record count accumulate into the key's bucket, along
///    with the person identity, name, competência and, for people on
///    leave, the leave reason.
///
/// Aggregate rows are summed like any other row but contribute no
/// identity and no name.
///
/// # Examples
///
/// ```
/// use folha_engine::engine::aggregate_by;
/// use folha_engine::models::PayrollRecord;
/// use rust_decimal::Decimal;
///
/// let records = vec![
///     PayrollRecord { nome: "ANA".into(), vinculo: "EFETIVO".into(), liquido: Some(Decimal::new(100, 0)), ..Default::default() },
///     PayrollRecord { nome: "BIA".into(), vinculo: "EFETIVO".into(), liquido: Some(Decimal::new(50, 0)), ..Default::default() },
///     PayrollRecord { nome: "CAIO".into(), vinculo: "".into(), liquido: Some(Decimal::new(70, 0)), ..Default::default() },
/// ];
///
/// let buckets = aggregate_by(&records, |r| {
///     (!r.vinculo.is_empty()).then(|| r.vinculo.clone())
/// });
///
/// assert_eq!(buckets.len(), 1);
/// assert_eq!(buckets["EFETIVO"].liquido, Decimal::new(150, 0));
/// assert_eq!(buckets["EFETIVO"].count, 2);
/// ```
pub fn aggregate_by<K, F>(records: &[PayrollRecord], key_fn: F) -> BTreeMap<K, AggregateBucket<K>>
where
    K: Ord + Clone,
    F: Fn(&PayrollRecord) -> Option<K>,
{
    let mut buckets: BTreeMap<K, AggregateBucket<K>> = BTreeMap::new();

    for record in records {
        let liquido = record.amount_or_zero(MoneyField::Liquido);
        let vantagem = record.amount_or_zero(MoneyField::Vantagem);
        let desconto = record.amount_or_zero(MoneyField::Desconto);

        if [liquido, vantagem, desconto]
            .into_iter()
            .any(exceeds_ceiling)
        {
            warn!(
                nome = %record.nome,
                competencia = %record.competencia,
                liquido = %liquido,
                vantagem = %vantagem,
                desconto = %desconto,
                "Record above outlier ceiling left out of aggregation"
            );
            continue;
        }

        let Some(key) = key_fn(record) else {
            continue;
        };

        let bucket = buckets
            .entry(key.clone())
            .or_insert_with(|| AggregateBucket::new(key));
        accumulate(bucket, record, liquido, vantagem, desconto);
    }

    buckets
}

fn accumulate<K>(
    bucket: &mut AggregateBucket<K>,
    record: &PayrollRecord,
    liquido: Decimal,
    vantagem: Decimal,
    desconto: Decimal,
) {
    bucket.liquido += liquido;
    bucket.vantagem += vantagem;
    bucket.desconto += desconto;
    bucket.count += 1;

    if let Some(identity) = person_key(record) {
        bucket.unique_persons.insert(identity);
    }
    if !record.is_aggregate_row() && !record.nome.trim().is_empty() {
        bucket.names.push(record.nome.trim().to_string());
    }
    if !record.competencia.trim().is_empty() {
        bucket.competencias.insert(record.competencia.trim().to_string());
    }

    let motivo = record.motivo_afastamento.trim();
    if record.normalized_status() == ON_LEAVE_STATUS && !motivo.is_empty() {
        bucket.leave_reasons.push(LeaveReason {
            nome: record.nome.trim().to_string(),
            motivo: motivo.to_string(),
        });
    }
}

/// Groups records along a standard [`Dimension`].
pub fn aggregate_by_dimension(
    records: &[PayrollRecord],
    dimension: Dimension,
) -> BTreeMap<String, AggregateBucket<String>> {
    aggregate_by(records, |record| dimension.key(record))
}
