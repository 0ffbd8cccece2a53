//! Competência (payroll month) parsing and labels.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

use super::PayrollRecord;

const MONTH_NAMES: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho", "Julho", "Agosto", "Setembro",
    "Outubro", "Novembro", "Dezembro",
];

const SHORT_MONTH_NAMES: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// A payroll month in `YYYY-MM` form.
///
/// # Example
///
/// ```
/// use folha_engine::models::Competencia;
///
/// let competencia: Competencia = "2025-04".parse().unwrap();
/// assert_eq!(competencia.year(), 2025);
/// assert_eq!(competencia.month(), 4);
/// assert_eq!(competencia.label(), "Abril/2025");
/// assert_eq!(competencia.short_label(), "Abr/25");
/// assert_eq!(competencia.to_string(), "2025-04");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Competencia {
    first_day: NaiveDate,
}

impl Competencia {
    /// Creates a competência from a year and a 1-based month.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    /// Returns the year.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// Returns the 1-based month.
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// Returns the long label, e.g. `Abril/2025`.
    pub fn label(&self) -> String {
        format!("{}/{}", MONTH_NAMES[self.month0()], self.year())
    }

    /// Returns the short label, e.g. `Abr/25`.
    pub fn short_label(&self) -> String {
        format!(
            "{}/{:02}",
            SHORT_MONTH_NAMES[self.month0()],
            self.year().rem_euclid(100)
        )
    }

    fn month0(&self) -> usize {
        self.first_day.month0() as usize
    }
}

impl FromStr for Competencia {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidCompetencia {
            value: value.to_string(),
        };

        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl TryFrom<String> for Competencia {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Competencia> for String {
    fn from(value: Competencia) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Competencia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Describes the period covered by a record set.
///
/// Returns the long label of the single competência, `first - last` when
/// there are several, and an empty string when no record carries a valid
/// competência.
pub fn period_label(records: &[PayrollRecord]) -> String {
    let mut competencias: Vec<Competencia> = records
        .iter()
        .filter_map(|record| record.competencia.parse().ok())
        .collect();
    competencias.sort();
    competencias.dedup();

    match (competencias.first(), competencias.last()) {
        (Some(first), Some(last)) if first == last => first.label(),
        (Some(first), Some(last)) => format!("{} - {}", first.label(), last.label()),
        _ => String::new(),
    }
}
