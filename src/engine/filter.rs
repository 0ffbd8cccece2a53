//! Filter engine.
//!
//! Applies the conjunction of the active [`FilterCriteria`] to a record
//! sequence. Single-record predicates run first; the multi-contract
//! predicate needs the whole candidate set and runs last.

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::debug;

use crate::models::{FilterCriteria, PayrollRecord, active};
use crate::normalize::{
    PersonKey, UMBRELLA_LABEL, department_children, person_key, resolve_department,
};

/// Filters records by the active criteria, preserving input order.
///
/// # Criteria semantics
///
/// - `year`: the first `-` segment of the competência equals the year
/// - `department`: the record's resolved department is the target or one
///   of its sub-units; a target that resolves to no department matches
///   nothing
/// - `status`: case-insensitive, blank status counts as `NÃO INFORMADO`
/// - `name_search`: case-insensitive substring of the name
/// - `only_multi_contract`: keeps people with more than one distinct
///   `(matricula, vinculo)` pair among the records that passed every
///   other criterion
/// - everything else: trimmed exact match
///
/// # Examples
///
/// ```
/// use folha_engine::engine::filter_records;
/// use folha_engine::models::{FilterCriteria, PayrollRecord};
///
/// let records = vec![
///     PayrollRecord { nome: "ANA".into(), cpf: "111".into(), matricula: "A".into(), ..Default::default() },
///     PayrollRecord { nome: "ANA".into(), cpf: "111".into(), matricula: "B".into(), ..Default::default() },
///     PayrollRecord { nome: "BIA".into(), cpf: "222".into(), matricula: "C".into(), ..Default::default() },
/// ];
///
/// let criteria = FilterCriteria::default().with_only_multi_contract(true);
/// let filtered = filter_records(&records, &criteria);
/// assert_eq!(filtered.len(), 2);
/// assert!(filtered.iter().all(|r| r.cpf == "111"));
/// ```
pub fn filter_records(records: &[PayrollRecord], criteria: &FilterCriteria) -> Vec<PayrollRecord> {
    let predicates = RecordPredicates::new(criteria);
    let mut result: Vec<PayrollRecord> = records
        .iter()
        .filter(|record| predicates.matches(record))
        .cloned()
        .collect();

    if criteria.only_multi_contract {
        result = retain_multi_contract(result);
    }

    debug!(
        input = records.len(),
        output = result.len(),
        "Filter applied"
    );
    result
}

/// The single-record predicates, prepared once per filter call.
struct RecordPredicates<'a> {
    year: Option<&'a str>,
    competencia: Option<&'a str>,
    departments: Option<HashSet<String>>,
    role: Option<&'a str>,
    level: Option<&'a str>,
    contract_type: Option<&'a str>,
    status: Option<String>,
    area: Option<&'a str>,
    leave_reason: Option<&'a str>,
    name_search: Option<String>,
}

impl<'a> RecordPredicates<'a> {
    fn new(criteria: &'a FilterCriteria) -> Self {
        Self {
            year: active(&criteria.year),
            competencia: active(&criteria.competencia),
            departments: active(&criteria.department).map(department_targets),
            role: active(&criteria.role),
            level: active(&criteria.level),
            contract_type: active(&criteria.contract_type),
            status: active(&criteria.status).map(str::to_uppercase),
            area: active(&criteria.area),
            leave_reason: active(&criteria.leave_reason),
            name_search: active(&criteria.name_search).map(str::to_lowercase),
        }
    }

    fn matches(&self, record: &PayrollRecord) -> bool {
        if let Some(year) = self.year {
            if record.year() != Some(year) {
                return false;
            }
        }
        if !text_matches(self.competencia, &record.competencia)
            || !text_matches(self.role, &record.funcao)
            || !text_matches(self.level, &record.nivel)
            || !text_matches(self.contract_type, &record.vinculo)
            || !text_matches(self.area, &record.area)
            || !text_matches(self.leave_reason, &record.motivo_afastamento)
        {
            return false;
        }
        if let Some(departments) = &self.departments {
            let resolved = resolve_department(
                record.department_label(),
                record.original_department_label(),
            );
            if !resolved.is_some_and(|department| departments.contains(&department)) {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if record.normalized_status() != *status {
                return false;
            }
        }
        if let Some(search) = &self.name_search {
            if !record.nome.to_lowercase().contains(search.as_str()) {
                return false;
            }
        }
        true
    }
}

fn text_matches(criterion: Option<&str>, value: &str) -> bool {
    criterion.is_none_or(|expected| value.trim() == expected)
}

/// Returns the canonical departments a department criterion accepts.
fn department_targets(department: &str) -> HashSet<String> {
    let Some(target) = resolve_department(department, None) else {
        return HashSet::new();
    };

    let mut targets = HashSet::new();
    if target != UMBRELLA_LABEL {
        targets.extend(
            department_children(&target)
                .iter()
                .map(|child| child.to_string()),
        );
    }
    targets.insert(target);
    targets
}

/// Keeps the records of people holding more than one distinct contract.
fn retain_multi_contract(records: Vec<PayrollRecord>) -> Vec<PayrollRecord> {
    let mut contracts: HashMap<PersonKey, BTreeSet<(&str, &str)>> = HashMap::new();
    for record in &records {
        if let Some(key) = person_key(record) {
            contracts
                .entry(key)
                .or_default()
                .insert((record.matricula.trim(), record.vinculo.trim()));
        }
    }

    let multi: HashSet<PersonKey> = contracts
        .into_iter()
        .filter(|(_, pairs)| pairs.len() > 1)
        .map(|(key, _)| key)
        .collect();

    records
        .into_iter()
        .filter(|record| person_key(record).is_some_and(|key| multi.contains(&key)))
        .collect()
}
