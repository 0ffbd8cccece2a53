//! Top-N selector.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{MoneyField, PayrollRecord};

/// One ranked record, with the fields a ranking table displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopEntry {
    /// Display name.
    pub nome: String,
    /// CPF as printed in the source.
    pub cpf: String,
    /// Department label, `N/A` when blank.
    pub lotacao_normalizada: String,
    /// Contract type.
    pub vinculo: String,
    /// Role.
    pub funcao: String,
    /// Status as printed in the source.
    pub situacao: String,
    /// The ranked field.
    pub field: MoneyField,
    /// The value of the ranked field.
    pub value: Decimal,
}

/// Returns the `n` records with the largest value of `field`.
///
/// Records with a blank name, aggregate rows and records whose field is
/// not numeric are left out. Ties keep input order. No outlier ceiling
/// applies here.
///
/// # Examples
///
/// ```
/// use folha_engine::engine::top_n;
/// use folha_engine::models::{MoneyField, PayrollRecord};
/// use rust_decimal::Decimal;
///
/// let records = vec![
///     PayrollRecord { nome: "ANA".into(), liquido: Some(Decimal::from(500)), ..Default::default() },
///     PayrollRecord { nome: "*Totais*".into(), liquido: Some(Decimal::from(9999)), ..Default::default() },
///     PayrollRecord { nome: "BIA".into(), liquido: Some(Decimal::from(700)), ..Default::default() },
/// ];
///
/// let top = top_n(&records, MoneyField::Liquido, 10);
/// let names: Vec<&str> = top.iter().map(|e| e.nome.as_str()).collect();
/// assert_eq!(names, vec!["BIA", "ANA"]);
/// ```
pub fn top_n(records: &[PayrollRecord], field: MoneyField, n: usize) -> Vec<TopEntry> {
    let mut ranked: Vec<(&PayrollRecord, Decimal)> = records
        .iter()
        .filter(|record| !record.nome.trim().is_empty() && !record.is_aggregate_row())
        .filter_map(|record| record.amount(field).map(|value| (record, value)))
        .collect();

    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);

    ranked
        .into_iter()
        .map(|(record, value)| TopEntry {
            nome: record.nome.clone(),
            cpf: record.cpf.clone(),
            lotacao_normalizada: display_department(record),
            vinculo: record.vinculo.clone(),
            funcao: record.funcao.clone(),
            situacao: record.situacao.clone(),
            field,
            value,
        })
        .collect()
}

fn display_department(record: &PayrollRecord) -> String {
    let label = record.department_label();
    if label.is_empty() {
        "N/A".to_string()
    } else {
        label.to_string()
    }
}
