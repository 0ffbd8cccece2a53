//! Department (lotação) resolution.
//!
//! Raw department labels extracted from the payroll documents come in many
//! variants. This module maps them to a small set of canonical department
//! codes through a static alias table, with a few overrides that inspect
//! the original, unnormalized label, and exposes the two-level unit
//! hierarchy used when filtering by a parent department.

/// Label of the umbrella pro-rectorate that only the original label can disambiguate.
pub const UMBRELLA_LABEL: &str = "PRO-REITORIA";

/// Label marking records without a department.
pub const NO_DEPARTMENT_LABEL: &str = "SEM LOTAÇÃO";

/// Historically observed labels and their canonical department.
///
/// `None` marks labels whose records must be left out of department
/// grouping.
pub const DEPARTMENT_ALIASES: &[(&str, Option<&str>)] = &[
    ("PROFA VALERIA", Some("ETSAL")),
    ("PORTUGAL RAMALHO", Some("HEPR")),
    ("CHEFIA GABINETE", Some("REITORIA")),
    ("MATERN ESCOLA SANTA", Some("MESM")),
    ("MOVIMENTACAO FUNCIONA", Some("SUMOF")),
    ("- SAUDE", Some("SERVIDORES CEDIDOS - SAUDE")),
    ("REITORIA", Some("REITORIA")),
    ("CHEF GES PESSOAS", Some("PROGESP")),
    ("CHEFIA DE GESTAO DE PESSOAS", Some("PROGESP")),
    ("HELVIO AUTO", Some("HEHA")),
    ("CENTRO DE CIENCIAS DA SAUDE", Some("CCS")),
    ("SERVICO VERIFICACAO OBITOS", Some("SVO")),
    ("CENTRO DE CIENCIAS INTEGRADORAS", Some("CCI")),
    ("SUPERVISAO ADMINISTRATIVA", Some("PROGAD")),
    ("AMBULATORIO ESPECIALIDADES", Some("AMBESP")),
    ("CENTRO PATOL MEDICINA", Some("CPML")),
    ("CONTAS PAGAR", Some("GEPOF")),
    ("MATERNIDADE", Some("MESM")),
    ("MATERN ESC SANTA", Some("MESM")),
    ("CENTRO DE TECNOLOGIA", Some("CTEC")),
    ("TECNOLOGIA INFORM", Some("SUTIN")),
    ("SAUDE BEM-EST", Some("SASBEM")),
    ("SUPERVISAO LOGISTICA", Some("PROGAD")),
    ("COORDENADORIA CURSO", Some("COORDENADORIA CURSO")),
    ("DESENVOLVIMENTO PE", Some("SUDES")),
    ("CENTRO ESPECIALIZADO REABILITACA", Some("CER")),
    ("CENTRO EDUCACAO DISTANCIA", Some("CED")),
    ("RELACOES COMUNITARIAS", Some("PROEX")),
    ("CHEFIA BIBLIOTECA", Some("PROEG")),
    ("ASSESSORIA COMUNICACAO", Some("ASCOM")),
    ("GESTAO ACADEM", Some("PROEG")),
    ("FINANCAS CONTABILID", Some("GEPOF")),
    ("PROCEDIMENTOS LICITAT", Some("REITORIA")),
    ("PESSOAS ACAD", Some("CGPA")),
    ("- EDUCACAO", Some("EDUCAÇÃO")),
    ("GOVERNANCA TRANSPAR", Some("AGT")),
    ("FORCA TRAB", Some("SUPLAF")),
    ("ASSESSORIA CERIMONIAL", Some("CERIMONIAL")),
    ("CONTROLADORIA INTERNA", Some("CONTROLADORIA INTERNA")),
    ("PLANEJAMENTO ORCAME", Some("GEPOF")),
    ("OUVIDORIA", Some("OUVIDORIA")),
    ("ASSIST PSICOPEDAG", Some("PROEST")),
    ("POLITICAS ESTUDANTIS", Some("PROEST")),
    ("CONTROLADORIA ACADEMI", Some("CONTROLADORIA ACADEMICA")),
    ("FIN CONT", Some("GEPOF")),
    ("ASSESSORIA TECNICA", Some("REITORIA")),
    ("LATO SE", Some("PROEX")),
    ("COORDENADORIA JURIDICA", Some("COJUR")),
    ("SUPERVISAO EXTENSAO", Some("PROEX")),
    ("ASSISTENCIA ESTUDANTI", Some("PROEST")),
    (NO_DEPARTMENT_LABEL, None),
    ("SUPERVISAO PESQUISA", Some("SUPE")),
];

/// Parent departments and their sub-units.
pub const DEPARTMENT_HIERARCHY: &[(&str, &[&str])] = &[
    ("PROGESP", &["SUMOF", "SASBEM", "CGPA", "SUPLAF", "SUDES"]),
    (
        "REITORIA",
        &[
            "CONTROLADORIA INTERNA",
            "CONTROLADORIA ACADEMICA",
            "ASSESSORIA TECNICA",
            "PROCEDIMENTOS LICITAT",
            "CHEFIA GABINETE",
        ],
    ),
];

const PEOPLE_MANAGEMENT: &str = "PROGESP";

/// Resolves a raw department label to its canonical department.
///
/// Resolution is deterministic and goes from most to least specific:
///
/// 1. a blank label resolves to `None`;
/// 2. overrides keyed on the normalized label inspect the original label
///    for people-management wording and resolve to `PROGESP`;
/// 3. an exact match in [`DEPARTMENT_ALIASES`] wins, and `SEM LOTAÇÃO`
///    resolves to `None`;
/// 4. any other label passes through unchanged.
///
/// # Examples
///
/// ```
/// use folha_engine::normalize::resolve_department;
///
/// assert_eq!(resolve_department("PORTUGAL RAMALHO", None).as_deref(), Some("HEPR"));
/// assert_eq!(resolve_department("SEM LOTAÇÃO", None), None);
/// assert_eq!(
///     resolve_department("PRO-REITORIA", Some("PRO-REITORIA DE GESTAO DE PESSOAS")).as_deref(),
///     Some("PROGESP")
/// );
/// assert_eq!(resolve_department("NOVO SETOR", None).as_deref(), Some("NOVO SETOR"));
/// ```
pub fn resolve_department(raw: &str, original: Option<&str>) -> Option<String> {
    let label = raw.trim();
    if label.is_empty() {
        return None;
    }

    let overridden = original
        .is_some_and(|original| overridden_to_people_management(label, &original.to_uppercase()));
    if overridden {
        return Some(PEOPLE_MANAGEMENT.to_string());
    }

    match DEPARTMENT_ALIASES.iter().find(|(alias, _)| *alias == label) {
        Some((_, canonical)) => canonical.map(str::to_string),
        None => Some(label.to_string()),
    }
}

fn overridden_to_people_management(label: &str, original: &str) -> bool {
    let mentions_people = original.contains("GESTAO DE PESSOAS") || original.contains("GES PESSOAS");
    match label {
        UMBRELLA_LABEL => mentions_people,
        "REITORIA" => original.contains(UMBRELLA_LABEL) && mentions_people,
        "PESSOAS ACAD" => {
            original.contains(UMBRELLA_LABEL) && original.contains("GESTAO DE PESSOAS")
        }
        _ => false,
    }
}

/// Returns the sub-units of a parent department.
///
/// ```
/// use folha_engine::normalize::department_children;
///
/// assert!(department_children("PROGESP").contains(&"SUDES"));
/// assert!(department_children("HEPR").is_empty());
/// ```
pub fn department_children(canonical: &str) -> &'static [&'static str] {
    DEPARTMENT_HIERARCHY
        .iter()
        .find(|(parent, _)| *parent == canonical)
        .map(|(_, children)| *children)
        .unwrap_or(&[])
}

/// Returns the parent of a sub-unit, if it has one.
pub fn parent_of(canonical: &str) -> Option<&'static str> {
    DEPARTMENT_HIERARCHY
        .iter()
        .find(|(_, children)| children.contains(&canonical))
        .map(|(parent, _)| *parent)
}

/// Returns every raw label that maps to a canonical department.
///
/// A department no alias maps to is its own only label.
pub fn raw_labels_for(canonical: &str) -> Vec<&str> {
    let labels: Vec<&str> = DEPARTMENT_ALIASES
        .iter()
        .filter(|(_, target)| *target == Some(canonical))
        .map(|(alias, _)| *alias)
        .collect();

    if labels.is_empty() {
        vec![canonical]
    } else {
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(raw: &str) -> Option<String> {
        resolve_department(raw, None)
    }

    #[test]
    fn test_known_aliases() {
        assert_eq!(resolve("PORTUGAL RAMALHO").as_deref(), Some("HEPR"));
        assert_eq!(resolve("PROFA VALERIA").as_deref(), Some("ETSAL"));
        assert_eq!(resolve("MATERN ESC SANTA").as_deref(), Some("MESM"));
        assert_eq!(resolve("CHEF GES PESSOAS").as_deref(), Some("PROGESP"));
        assert_eq!(resolve("FORCA TRAB").as_deref(), Some("SUPLAF"));
        assert_eq!(resolve("- EDUCACAO").as_deref(), Some("EDUCAÇÃO"));
    }

    #[test]
    fn test_no_department_sentinel_resolves_to_none() {
        assert_eq!(resolve(NO_DEPARTMENT_LABEL), None);
        assert_eq!(resolve("   "), None);
        assert_eq!(resolve(""), None);
    }

    #[test]
    fn test_unmatched_label_passes_through() {
        assert_eq!(resolve(" PRO-REITORIA ").as_deref(), Some("PRO-REITORIA"));
        assert_eq!(resolve("LABORATORIO X").as_deref(), Some("LABORATORIO X"));
    }

    #[test]
    fn test_umbrella_label_with_people_management_original() {
        assert_eq!(
            resolve_department("PRO-REITORIA", Some("pro-reitoria da gestao de pessoas"))
                .as_deref(),
            Some("PROGESP")
        );
        assert_eq!(
            resolve_department("PRO-REITORIA", Some("PRO-REITORIA DE EXTENSAO")).as_deref(),
            Some("PRO-REITORIA")
        );
    }

    #[test]
    fn test_reitoria_override_requires_pro_reitoria_and_people() {
        assert_eq!(
            resolve_department("REITORIA", Some("PRO-REITORIA GES PESSOAS")).as_deref(),
            Some("PROGESP")
        );
        assert_eq!(
            resolve_department("REITORIA", Some("REITORIA GESTAO DE PESSOAS")).as_deref(),
            Some("REITORIA")
        );
        assert_eq!(
            resolve_department("REITORIA", Some("GABINETE DA REITORIA")).as_deref(),
            Some("REITORIA")
        );
    }

    #[test]
    fn test_pessoas_acad_override() {
        assert_eq!(
            resolve_department(
                "PESSOAS ACAD",
                Some("PRO-REITORIA DA GESTAO DE PESSOAS - ACAD")
            )
            .as_deref(),
            Some("PROGESP")
        );
        assert_eq!(
            resolve_department("PESSOAS ACAD", Some("CHEFIA DE GESTAO DE PESSOAS DA ACAD"))
                .as_deref(),
            Some("CGPA")
        );
    }

    #[test]
    fn test_override_does_not_apply_to_other_labels() {
        assert_eq!(
            resolve_department("PORTUGAL RAMALHO", Some("PRO-REITORIA GESTAO DE PESSOAS"))
                .as_deref(),
            Some("HEPR")
        );
    }

    #[test]
    fn test_hierarchy() {
        assert_eq!(department_children("REITORIA").len(), 5);
        assert_eq!(parent_of("SASBEM"), Some("PROGESP"));
        assert_eq!(parent_of("CHEFIA GABINETE"), Some("REITORIA"));
        assert_eq!(parent_of("PROGESP"), None);
    }

    #[test]
    fn test_raw_labels_for() {
        let labels = raw_labels_for("MESM");
        assert_eq!(
            labels,
            vec!["MATERN ESCOLA SANTA", "MATERNIDADE", "MATERN ESC SANTA"]
        );
        assert_eq!(raw_labels_for("NOVO"), vec!["NOVO"]);
    }

    #[test]
    fn test_alias_table_has_unique_keys() {
        let mut keys: Vec<&str> = DEPARTMENT_ALIASES.iter().map(|(k, _)| *k).collect();
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }
}
