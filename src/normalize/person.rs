//! Person identity shared by filtering, aggregation and statistics.
//!
//! Every component that counts or groups people derives the identity
//! through [`person_key`] so that unique counts agree across report views.

use serde::{Deserialize, Serialize};

use crate::models::PayrollRecord;

use super::cpf::normalize_cpf;

/// The identity of a person.
///
/// Variants never compare equal to each other, so a name can never collide
/// with a CPF.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PersonKey {
    /// An 11-digit normalized CPF.
    Cpf(String),
    /// The trimmed display name, used when the CPF is unusable.
    Name(String),
    /// The trimmed CPF text, used when neither a valid CPF nor a name exists.
    RawCpf(String),
}

/// Derives the identity of the person behind a record.
///
/// Embedded aggregate rows have no identity. Otherwise uses the normalized
/// CPF when it has 11 digits, then the trimmed name, then the trimmed CPF
/// text. Returns `None` when nothing identifies the record.
///
/// # Examples
///
/// ```
/// use folha_engine::models::PayrollRecord;
/// use folha_engine::normalize::{person_key, PersonKey};
///
/// let with_cpf = PayrollRecord {
///     nome: "ANA".to_string(),
///     cpf: "123.456.789-01".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(person_key(&with_cpf), Some(PersonKey::Cpf("12345678901".to_string())));
///
/// let bad_cpf = PayrollRecord {
///     nome: " ANA ".to_string(),
///     cpf: "000".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(person_key(&bad_cpf), Some(PersonKey::Name("ANA".to_string())));
///
/// let totals = PayrollRecord { nome: "*Totais*".to_string(), ..Default::default() };
/// assert_eq!(person_key(&totals), None);
/// ```
pub fn person_key(record: &PayrollRecord) -> Option<PersonKey> {
    if record.is_aggregate_row() {
        return None;
    }

    let cpf = normalize_cpf(&record.cpf);
    if !cpf.is_empty() {
        return Some(PersonKey::Cpf(cpf));
    }

    let name = record.nome.trim();
    if !name.is_empty() {
        return Some(PersonKey::Name(name.to_string()));
    }

    let raw_cpf = record.cpf.trim();
    (!raw_cpf.is_empty()).then(|| PersonKey::RawCpf(raw_cpf.to_string()))
}
