//! Filter criteria value object.
//!
//! The criteria are passed explicitly into the filter engine, so the
//! engine never reads UI state.

use serde::{Deserialize, Serialize};

/// The optional predicates of a filter request.
///
/// Every present, non-blank criterion narrows the result; absent or blank
/// criteria are ignored.
///
/// # Example
///
/// ```
/// use folha_engine::models::FilterCriteria;
///
/// let criteria = FilterCriteria::default()
///     .with_year("2025")
///     .with_department("PROGESP")
///     .with_only_multi_contract(true);
///
/// assert_eq!(criteria.year.as_deref(), Some("2025"));
/// assert!(criteria.only_multi_contract);
/// assert!(!criteria.is_empty());
/// assert!(FilterCriteria::default().with_status("  ").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// `YYYY` year of the competência.
    pub year: Option<String>,
    /// Exact competência (`YYYY-MM`).
    pub competencia: Option<String>,
    /// Canonical department; sub-units are included.
    pub department: Option<String>,
    /// Role (`funcao`).
    pub role: Option<String>,
    /// Career level (`nivel`).
    pub level: Option<String>,
    /// Contract type (`vinculo`).
    pub contract_type: Option<String>,
    /// Status (`situacao`), case-insensitive.
    pub status: Option<String>,
    /// Area of activity.
    pub area: Option<String>,
    /// Leave reason (`motivo_afastamento`).
    pub leave_reason: Option<String>,
    /// Case-insensitive substring of the name.
    pub name_search: Option<String>,
    /// Keep only people holding more than one contract.
    pub only_multi_contract: bool,
}

impl FilterCriteria {
    /// Sets the year criterion.
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Sets the competência criterion.
    pub fn with_competencia(mut self, competencia: impl Into<String>) -> Self {
        self.competencia = Some(competencia.into());
        self
    }

    /// Sets the department criterion.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Sets the role criterion.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Sets the level criterion.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Sets the contract type criterion.
    pub fn with_contract_type(mut self, contract_type: impl Into<String>) -> Self {
        self.contract_type = Some(contract_type.into());
        self
    }

    /// Sets the status criterion.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the area criterion.
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    /// Sets the leave reason criterion.
    pub fn with_leave_reason(mut self, leave_reason: impl Into<String>) -> Self {
        self.leave_reason = Some(leave_reason.into());
        self
    }

    /// Sets the name search criterion.
    pub fn with_name_search(mut self, name_search: impl Into<String>) -> Self {
        self.name_search = Some(name_search.into());
        self
    }

    /// Enables or disables the multi-contract criterion.
    pub fn with_only_multi_contract(mut self, only_multi_contract: bool) -> Self {
        self.only_multi_contract = only_multi_contract;
        self
    }

    /// Returns true when no criterion is active.
    pub fn is_empty(&self) -> bool {
        [
            &self.year,
            &self.competencia,
            &self.department,
            &self.role,
            &self.level,
            &self.contract_type,
            &self.status,
            &self.area,
            &self.leave_reason,
            &self.name_search,
        ]
        .into_iter()
        .all(|value| active(value).is_none())
            && !self.only_multi_contract
    }
}

/// Returns the trimmed criterion when it is present and non-blank.
pub(crate) fn active(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(FilterCriteria::default().is_empty());
    }

    #[test]
    fn test_multi_contract_alone_is_not_empty() {
        assert!(!FilterCriteria::default().with_only_multi_contract(true).is_empty());
    }

    #[test]
    fn test_active_trims_and_skips_blank() {
        assert_eq!(active(&Some(" 2025 ".to_string())), Some("2025"));
        assert_eq!(active(&Some("   ".to_string())), None);
        assert_eq!(active(&None), None);
    }

    #[test]
    fn test_deserialize_partial_criteria() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"status": "afastado", "only_multi_contract": true}"#)
                .unwrap();
        assert_eq!(criteria.status.as_deref(), Some("afastado"));
        assert!(criteria.only_multi_contract);
        assert_eq!(criteria.year, None);
    }
}
