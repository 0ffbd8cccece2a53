//! Source document parsing.
//!
//! Two document shapes are recognized:
//!
//! - payroll: `{"competencia": "2025-04", "registros": [ ... ]}`
//! - expenditure: `{"mes_01": [ ... ], "mes_02": [ ... ]}`, whose rows use
//!   their own field names and are mapped onto [`PayrollRecord`]

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::LoaderSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{ACTIVE_STATUS, Competencia, PayrollRecord, coerce_amount};

/// Contract type stamped on expenditure rows that carry none.
pub const EXPENDITURE_CONTRACT_TYPE: &str = "EMPENHO";

const RECORDS_KEY: &str = "registros";
const MONTH_KEY_PREFIX: &str = "mes_";

/// The shape a source document was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A monthly payroll extract.
    Payroll,
    /// A contract-expenditure extract grouped by month.
    Expenditure,
}

/// The records of one parsed source document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSource {
    /// The recognized shape.
    pub kind: SourceKind,
    /// Competência declared by a payroll document.
    pub competencia: Option<String>,
    /// The records, in document order.
    pub records: Vec<PayrollRecord>,
}

/// Parses a source document, detecting its shape.
///
/// Payroll records without a competência get the one the document
/// declares. Anything that is not valid JSON fails with
/// [`EngineError::SourceParseError`], and valid JSON of another shape with
/// [`EngineError::InvalidSourceShape`].
///
/// # Examples
///
/// ```
/// use folha_engine::config::LoaderSettings;
/// use folha_engine::loader::{SourceKind, parse_source};
///
/// let json = br#"{"competencia": "2025-04", "registros": [{"nome": "ANA", "liquido": 100}]}"#;
/// let parsed = parse_source("2025-04.json", json, &LoaderSettings::default()).unwrap();
///
/// assert_eq!(parsed.kind, SourceKind::Payroll);
/// assert_eq!(parsed.records.len(), 1);
/// assert_eq!(parsed.records[0].competencia, "2025-04");
/// ```
pub fn parse_source(
    name: &str,
    bytes: &[u8],
    settings: &LoaderSettings,
) -> EngineResult<ParsedSource> {
    let document: Value =
        serde_json::from_slice(bytes).map_err(|e| EngineError::SourceParseError {
            name: name.to_string(),
            message: e.to_string(),
        })?;

    let Value::Object(document) = document else {
        return Err(shape_error(name, "expected a JSON object"));
    };

    if document.contains_key(RECORDS_KEY) {
        parse_payroll(name, document)
    } else if document.keys().any(|key| is_month_key(key)) {
        parse_expenditure(name, document, settings.expenditure_year)
    } else {
        Err(shape_error(
            name,
            "expected a 'registros' array or 'mes_XX' month arrays",
        ))
    }
}

fn shape_error(name: &str, message: &str) -> EngineError {
    EngineError::InvalidSourceShape {
        name: name.to_string(),
        message: message.to_string(),
    }
}

fn is_month_key(key: &str) -> bool {
    key.strip_prefix(MONTH_KEY_PREFIX)
        .is_some_and(|month| !month.is_empty() && month.bytes().all(|b| b.is_ascii_digit()))
}

fn parse_payroll(name: &str, mut document: Map<String, Value>) -> EngineResult<ParsedSource> {
    let Some(Value::Array(rows)) = document.remove(RECORDS_KEY) else {
        return Err(shape_error(name, "'registros' must be an array"));
    };

    let competencia = document
        .get("competencia")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        let mut record: PayrollRecord =
            serde_json::from_value(row).map_err(|e| EngineError::SourceParseError {
                name: name.to_string(),
                message: format!("record {index}: {e}"),
            })?;
        if record.competencia.trim().is_empty() {
            if let Some(declared) = &competencia {
                record.competencia = declared.clone();
            }
        }
        records.push(record);
    }

    Ok(ParsedSource {
        kind: SourceKind::Payroll,
        competencia,
        records,
    })
}

fn parse_expenditure(
    name: &str,
    document: Map<String, Value>,
    year: i32,
) -> EngineResult<ParsedSource> {
    let mut months: Vec<(u32, Vec<Value>)> = Vec::new();
    for (key, value) in document {
        if !is_month_key(&key) {
            continue;
        }
        let Value::Array(rows) = value else {
            return Err(shape_error(name, &format!("'{key}' must be an array")));
        };
        let Ok(month) = key[MONTH_KEY_PREFIX.len()..].parse::<u32>() else {
            return Err(shape_error(name, &format!("'{key}' is not a month")));
        };
        months.push((month, rows));
    }
    months.sort_by_key(|(month, _)| *month);

    let mut records = Vec::new();
    for (month, rows) in months {
        for (index, row) in rows.into_iter().enumerate() {
            let Value::Object(row) = row else {
                return Err(EngineError::SourceParseError {
                    name: name.to_string(),
                    message: format!("mes_{month:02} record {index}: expected an object"),
                });
            };
            let record = expenditure_record(&row, year, month).ok_or_else(|| {
                EngineError::SourceParseError {
                    name: name.to_string(),
                    message: format!("mes_{month:02} record {index}: invalid competência"),
                }
            })?;
            records.push(record);
        }
    }

    Ok(ParsedSource {
        kind: SourceKind::Expenditure,
        competencia: None,
        records,
    })
}

/// Maps an expenditure row onto the payroll record shape.
///
/// Returns `None` when the row's month is not a valid calendar month.
fn expenditure_record(
    row: &Map<String, Value>,
    year: i32,
    file_month: u32,
) -> Option<PayrollRecord> {
    let salary = row
        .get("salario")
        .and_then(coerce_amount)
        .unwrap_or(Decimal::ZERO);
    let lotacao = text(row, "lotacao");

    let month = match row.get("mes_referencia").and_then(coerce_amount) {
        Some(month) => month.trunc().to_u32()?,
        None => file_month,
    };
    let competencia = Competencia::new(year, month)?;

    Some(PayrollRecord {
        nome: text(row, "nome"),
        cpf: text(row, "cpf"),
        matricula: text(row, "matricula"),
        competencia: competencia.to_string(),
        lotacao_original: lotacao.clone(),
        lotacao_normalizada: lotacao,
        funcao: text(row, "cargo"),
        vinculo: or_default(text(row, "vinculo"), EXPENDITURE_CONTRACT_TYPE),
        situacao: or_default(text(row, "situacao"), ACTIVE_STATUS),
        area: text(row, "area"),
        carga_horaria: text(row, "carga_horaria"),
        admissao: text(row, "admissao"),
        vantagem: Some(salary),
        desconto: Some(Decimal::ZERO),
        liquido: Some(salary),
        ..Default::default()
    })
}

fn text(row: &Map<String, Value>, key: &str) -> String {
    match row.get(key) {
        Some(Value::String(value)) => value.clone(),
        Some(Value::Number(value)) => value.to_string(),
        _ => String::new(),
    }
}

fn or_default(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value
    }
}
