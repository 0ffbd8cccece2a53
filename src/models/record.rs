//! Payroll record model and related types.
//!
//! A [`PayrollRecord`] is one row per person per contract per competência,
//! as extracted from the payroll and expenditure JSON files. Field names
//! stay in Portuguese on the wire so that the source files deserialize
//! without renaming.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Monetary values above this ceiling are treated as data-entry errors.
pub const OUTLIER_CEILING: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);

/// Returns true when an amount's magnitude is above [`OUTLIER_CEILING`].
///
/// Negative amounts are compared by magnitude.
///
/// ```
/// use folha_engine::models::exceeds_ceiling;
/// use rust_decimal::Decimal;
///
/// assert!(!exceeds_ceiling(Decimal::from(10_000_000)));
/// assert!(exceeds_ceiling(Decimal::from(10_000_001)));
/// assert!(exceeds_ceiling(Decimal::from(-10_000_001)));
/// assert!(exceeds_ceiling(Decimal::MIN));
/// ```
pub fn exceeds_ceiling(amount: Decimal) -> bool {
    amount.abs() > OUTLIER_CEILING
}

/// Category used when a categorical field is blank.
pub const NOT_INFORMED: &str = "NÃO INFORMADO";

/// Name carried by the aggregate rows embedded in the source files.
pub const AGGREGATE_ROW_SENTINEL: &str = "*Totais*";

/// Status that is always listed first.
pub const ACTIVE_STATUS: &str = "ATIVO";

/// Status of people on leave.
pub const ON_LEAVE_STATUS: &str = "AFASTADO";

/// Identifies one of the monetary fields of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoneyField {
    /// Net pay (`liquido`).
    Liquido,
    /// Gross pay or advantages (`vantagem`).
    Vantagem,
    /// Deductions (`desconto`).
    Desconto,
}

impl MoneyField {
    /// Returns the field name used in the source files.
    pub fn as_str(self) -> &'static str {
        match self {
            MoneyField::Liquido => "liquido",
            MoneyField::Vantagem => "vantagem",
            MoneyField::Desconto => "desconto",
        }
    }
}

/// Identifies a categorical field used for filter option lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    /// `competencia`
    Competencia,
    /// `lotacao_normalizada`
    LotacaoNormalizada,
    /// `funcao`
    Funcao,
    /// `nivel`
    Nivel,
    /// `vinculo`
    Vinculo,
    /// `situacao`
    Situacao,
    /// `area`
    Area,
    /// `motivo_afastamento`
    MotivoAfastamento,
}

/// One payroll or expenditure row.
///
/// Text fields are lenient: numbers are rendered to text and missing or
/// `null` values become the empty string. Monetary fields are `None` when
/// the source value cannot be coerced to a number.
///
/// # Example
///
/// ```
/// use folha_engine::models::PayrollRecord;
/// use rust_decimal::Decimal;
///
/// let json = r#"{
///     "nome": "MARIA DA SILVA",
///     "cpf": "123.456.789-01",
///     "matricula": 40213,
///     "competencia": "2025-04",
///     "liquido": 3241.36,
///     "vantagem": "4000.00",
///     "desconto": "n/a"
/// }"#;
///
/// let record: PayrollRecord = serde_json::from_str(json).unwrap();
/// assert_eq!(record.matricula, "40213");
/// assert_eq!(record.liquido, Some(Decimal::new(324136, 2)));
/// assert_eq!(record.vantagem, Some(Decimal::new(400000, 2)));
/// assert_eq!(record.desconto, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Display name of the person.
    #[serde(default, deserialize_with = "lenient_text")]
    pub nome: String,
    /// Free-text CPF, possibly punctuated or blank.
    #[serde(default, deserialize_with = "lenient_text")]
    pub cpf: String,
    /// Contract / enrollment identifier.
    #[serde(default, deserialize_with = "lenient_text")]
    pub matricula: String,
    /// Payroll month in `YYYY-MM` form.
    #[serde(default, deserialize_with = "lenient_text")]
    pub competencia: String,
    /// Generic department label used by older extracts.
    #[serde(default, deserialize_with = "lenient_text")]
    pub lotacao: String,
    /// Department label as normalized by the extraction scripts.
    #[serde(default, deserialize_with = "lenient_text")]
    pub lotacao_normalizada: String,
    /// Department label as printed in the source document.
    #[serde(default, deserialize_with = "lenient_text")]
    pub lotacao_original: String,
    /// Role.
    #[serde(default, deserialize_with = "lenient_text")]
    pub funcao: String,
    /// Career level.
    #[serde(default, deserialize_with = "lenient_text")]
    pub nivel: String,
    /// Contract type.
    #[serde(default, deserialize_with = "lenient_text")]
    pub vinculo: String,
    /// Employment status.
    #[serde(default, deserialize_with = "lenient_text")]
    pub situacao: String,
    /// Area of activity (expenditure extracts).
    #[serde(default, deserialize_with = "lenient_text")]
    pub area: String,
    /// Reason for leave, when on leave.
    #[serde(default, deserialize_with = "lenient_text")]
    pub motivo_afastamento: String,
    /// Weekly workload (expenditure extracts).
    #[serde(default, deserialize_with = "lenient_text")]
    pub carga_horaria: String,
    /// Admission date as printed (expenditure extracts).
    #[serde(default, deserialize_with = "lenient_text")]
    pub admissao: String,
    /// Gross pay.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub vantagem: Option<Decimal>,
    /// Deductions.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub desconto: Option<Decimal>,
    /// Net pay.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub liquido: Option<Decimal>,
}

impl PayrollRecord {
    /// Returns the coerced value of a monetary field.
    pub fn amount(&self, field: MoneyField) -> Option<Decimal> {
        match field {
            MoneyField::Liquido => self.liquido,
            MoneyField::Vantagem => self.vantagem,
            MoneyField::Desconto => self.desconto,
        }
    }

    /// Returns the value of a monetary field, zero when it is not numeric.
    pub fn amount_or_zero(&self, field: MoneyField) -> Decimal {
        self.amount(field).unwrap_or(Decimal::ZERO)
    }

    /// Returns the raw text of a categorical field.
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Competencia => &self.competencia,
            TextField::LotacaoNormalizada => &self.lotacao_normalizada,
            TextField::Funcao => &self.funcao,
            TextField::Nivel => &self.nivel,
            TextField::Vinculo => &self.vinculo,
            TextField::Situacao => &self.situacao,
            TextField::Area => &self.area,
            TextField::MotivoAfastamento => &self.motivo_afastamento,
        }
    }

    /// Returns true for the aggregate rows embedded in the source files.
    ///
    /// ```
    /// use folha_engine::models::PayrollRecord;
    ///
    /// let totals = PayrollRecord { nome: "*Totais*".to_string(), ..Default::default() };
    /// let grand_total = PayrollRecord { nome: "TOTAL GERAL".to_string(), ..Default::default() };
    /// let person = PayrollRecord { nome: "ANA LIMA".to_string(), ..Default::default() };
    /// assert!(totals.is_aggregate_row());
    /// assert!(grand_total.is_aggregate_row());
    /// assert!(!person.is_aggregate_row());
    /// ```
    pub fn is_aggregate_row(&self) -> bool {
        self.nome.contains(AGGREGATE_ROW_SENTINEL) || self.nome.contains("TOTAL")
    }

    /// Returns the status trimmed and upper-cased, `NÃO INFORMADO` when blank.
    pub fn normalized_status(&self) -> String {
        or_not_informed(&self.situacao.trim().to_uppercase())
    }

    /// Returns the department label used for resolution.
    pub fn department_label(&self) -> &str {
        if self.lotacao_normalizada.trim().is_empty() {
            self.lotacao.trim()
        } else {
            self.lotacao_normalizada.trim()
        }
    }

    /// Returns the original department label, if any.
    pub fn original_department_label(&self) -> Option<&str> {
        let original = self.lotacao_original.trim();
        (!original.is_empty()).then_some(original)
    }

    /// Returns the `YYYY` portion of the competência.
    pub fn year(&self) -> Option<&str> {
        self.competencia
            .split('-')
            .next()
            .map(str::trim)
            .filter(|year| !year.is_empty())
    }
}

/// Returns `value` trimmed, or `NÃO INFORMADO` when blank.
pub(crate) fn or_not_informed(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        NOT_INFORMED.to_string()
    } else {
        trimmed.to_string()
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    })
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_amount(&value))
}

/// Coerces a JSON value to a decimal amount.
///
/// Numbers convert exactly from their textual form, numeric strings are
/// parsed (a blank string counts as zero), and everything else fails.
pub fn coerce_amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Some(Decimal::from(int));
            }
            if let Some(int) = number.as_u64() {
                return Some(Decimal::from(int));
            }
            parse_decimal(&number.to_string())
                .or_else(|| number.as_f64().and_then(|float| Decimal::try_from(float).ok()))
        }
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Some(Decimal::ZERO)
            } else {
                parse_decimal(trimmed)
            }
        }
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
