// Property-based tests for the filter, aggregation and statistics engines.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;
use rust_decimal::Decimal;

use folha_engine::engine::{
    Dimension, aggregate_by_dimension, compute_stats, filter_records, top_n,
};
use folha_engine::models::{
    FilterCriteria, MoneyField, OUTLIER_CEILING, PayrollRecord, exceeds_ceiling,
};
use folha_engine::normalize::normalize_cpf;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Mostly ordinary amounts, sometimes outliers, negatives or garbage.
fn arb_amount() -> impl Strategy<Value = Option<Decimal>> {
    prop_oneof![
        6 => (0i64..2_000_000).prop_map(|cents| Some(Decimal::new(cents, 2))),
        1 => (10_000_001i64..90_000_000).prop_map(|units| Some(Decimal::from(units))),
        1 => (-50_000i64..0).prop_map(|cents| Some(Decimal::new(cents, 2))),
        1 => Just(None),
    ]
}

fn arb_record() -> impl Strategy<Value = PayrollRecord> {
    (
        prop_oneof![
            4 => prop::sample::select(vec!["ANA LIMA", "BRUNO DIAS", "CARLA REIS", "DAVI COSTA"]),
            1 => Just("*Totais*"),
            1 => Just(""),
        ],
        prop::sample::select(vec!["12345678901", "123.456.789-01", "98765432100", "111", ""]),
        prop::sample::select(vec!["1", "2", "3", ""]),
        prop::sample::select(vec!["2024-12", "2025-01", "2025-02", ""]),
        prop::sample::select(vec![
            "PORTUGAL RAMALHO",
            "SAUDE BEM-EST",
            "CHEF GES PESSOAS",
            "SEM LOTAÇÃO",
            "NOVO SETOR",
            "",
        ]),
        prop::sample::select(vec!["EFETIVO", "COMISSIONADO", ""]),
        prop::sample::select(vec!["ATIVO", "afastado", " ", "CEDIDO"]),
        arb_amount(),
        arb_amount(),
        arb_amount(),
    )
        .prop_map(
            |(nome, cpf, matricula, competencia, lotacao, vinculo, situacao, liquido, vantagem, desconto)| {
                PayrollRecord {
                    nome: nome.to_string(),
                    cpf: cpf.to_string(),
                    matricula: matricula.to_string(),
                    competencia: competencia.to_string(),
                    lotacao_normalizada: lotacao.to_string(),
                    vinculo: vinculo.to_string(),
                    situacao: situacao.to_string(),
                    liquido,
                    vantagem,
                    desconto,
                    ..Default::default()
                }
            },
        )
}

/// Mostly ordinary amounts, sometimes outliers (either sign), or garbage.
fn arb_any_amount() -> impl Strategy<Value = Option<Decimal>> {
    prop_oneof![
        4 => arb_amount(),
        1 => Just(Some(Decimal::MIN)),
        1 => (-90_000_000i64..-10_000_001).prop_map(|units| Some(Decimal::from(units))),
    ]
}

fn arb_records() -> impl Strategy<Value = Vec<PayrollRecord>> {
    prop::collection::vec(arb_record(), 0..40)
}

fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        prop::option::of(prop::sample::select(vec!["2024", "2025"])),
        prop::option::of(prop::sample::select(vec!["HEPR", "PROGESP", "NOVO SETOR"])),
        prop::option::of(prop::sample::select(vec!["EFETIVO", "COMISSIONADO"])),
        prop::option::of(prop::sample::select(vec!["ativo", "AFASTADO", "NÃO INFORMADO"])),
        prop::option::of(prop::sample::select(vec!["li", "DIAS", ""])),
        any::<bool>(),
    )
        .prop_map(|(year, department, vinculo, status, search, multi)| FilterCriteria {
            year: year.map(str::to_string),
            department: department.map(str::to_string),
            contract_type: vinculo.map(str::to_string),
            status: status.map(str::to_string),
            name_search: search.map(str::to_string),
            only_multi_contract: multi,
            ..FilterCriteria::default()
        })
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn filter_is_idempotent(records in arb_records(), criteria in arb_criteria()) {
        let once = filter_records(&records, &criteria);
        let twice = filter_records(&once, &criteria);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn single_record_criteria_are_monotone(
        records in arb_records(),
        criteria in arb_criteria(),
        extra_status in prop::sample::select(vec!["ATIVO", "CEDIDO"]),
    ) {
        // Single-record criteria only: multi-contract depends on the whole set.
        let base = FilterCriteria { only_multi_contract: false, ..criteria };
        let narrower = FilterCriteria {
            status: Some(extra_status.to_string()),
            ..base.clone()
        };
        let broad = filter_records(&records, &FilterCriteria { status: None, ..base });
        let narrow = filter_records(&records, &narrower);

        prop_assert!(narrow.len() <= broad.len());
        prop_assert!(narrow.iter().all(|record| broad.contains(record)));
    }

    #[test]
    fn filter_preserves_order(records in arb_records(), criteria in arb_criteria()) {
        let filtered = filter_records(&records, &criteria);
        let mut remaining = records.iter();
        for record in &filtered {
            prop_assert!(remaining.any(|candidate| candidate == record));
        }
    }
}

/// The single-record criteria, one per key.
#[derive(Debug, Clone, Copy)]
enum ExtraCriterion {
    Competencia,
    Department,
    Role,
    ContractType,
    Area,
    LeaveReason,
    NameSearch,
}

fn arb_extra_criterion() -> impl Strategy<Value = (ExtraCriterion, &'static str)> {
    (
        prop::sample::select(vec![
            ExtraCriterion::Competencia,
            ExtraCriterion::Department,
            ExtraCriterion::Role,
            ExtraCriterion::ContractType,
            ExtraCriterion::Area,
            ExtraCriterion::LeaveReason,
            ExtraCriterion::NameSearch,
        ]),
        prop::sample::select(vec![
            "2025-01", "HEPR", "PROGESP", "SASBEM", "NOVO SETOR", "EFETIVO", "ana", "DIAS", "",
        ]),
    )
}

/// Returns `criteria` without the key (`broad`) and with it set (`narrow`).
fn with_and_without(
    criteria: FilterCriteria,
    extra: ExtraCriterion,
    value: &str,
) -> (FilterCriteria, FilterCriteria) {
    let mut broad = criteria;
    let mut narrow = broad.clone();
    let value = Some(value.to_string());
    match extra {
        ExtraCriterion::Competencia => (broad.competencia, narrow.competencia) = (None, value),
        ExtraCriterion::Department => (broad.department, narrow.department) = (None, value),
        ExtraCriterion::Role => (broad.role, narrow.role) = (None, value),
        ExtraCriterion::ContractType => {
            (broad.contract_type, narrow.contract_type) = (None, value)
        }
        ExtraCriterion::Area => (broad.area, narrow.area) = (None, value),
        ExtraCriterion::LeaveReason => (broad.leave_reason, narrow.leave_reason) = (None, value),
        ExtraCriterion::NameSearch => (broad.name_search, narrow.name_search) = (None, value),
    }
    (broad, narrow)
}

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn adding_any_criterion_never_grows_the_result(
        records in arb_records(),
        criteria in arb_criteria(),
        (extra, value) in arb_extra_criterion(),
    ) {
        let (broad, narrow) = with_and_without(criteria, extra, value);
        let broad = filter_records(&records, &broad);
        let narrow = filter_records(&records, &narrow);

        prop_assert!(narrow.len() <= broad.len());
        prop_assert!(narrow.iter().all(|record| broad.contains(record)));
    }
}

// ---------------------------------------------------------------------------
// Aggregation and statistics
// ---------------------------------------------------------------------------

fn within_ceiling(record: &PayrollRecord) -> bool {
    [record.liquido, record.vantagem, record.desconto]
        .into_iter()
        .all(|amount| !exceeds_ceiling(amount.unwrap_or(Decimal::ZERO)))
}

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn aggregation_conserves_net_sum(records in arb_records()) {
        let buckets = aggregate_by_dimension(&records, Dimension::Competencia);
        let bucket_total: Decimal = buckets.values().map(|b| b.liquido).sum();

        let expected: Decimal = records
            .iter()
            .filter(|r| within_ceiling(r))
            .map(|r| r.liquido.unwrap_or(Decimal::ZERO))
            .sum();

        prop_assert_eq!(bucket_total, expected);
    }

    #[test]
    fn aggregation_conserves_record_count(records in arb_records()) {
        for dimension in [Dimension::Competencia, Dimension::Status, Dimension::Department] {
            let buckets = aggregate_by_dimension(&records, dimension);
            let bucket_count: usize = buckets.values().map(|b| b.count).sum();
            let expected = records
                .iter()
                .filter(|r| within_ceiling(r) && dimension.key(r).is_some())
                .count();
            prop_assert_eq!(bucket_count, expected);
        }

        // Competência keys are never null, so without outliers every record lands.
        let ordinary: Vec<PayrollRecord> =
            records.iter().filter(|r| within_ceiling(r)).cloned().collect();
        let buckets = aggregate_by_dimension(&ordinary, Dimension::Competencia);
        prop_assert_eq!(buckets.values().map(|b| b.count).sum::<usize>(), ordinary.len());
    }

    #[test]
    fn outliers_of_either_sign_never_panic(
        records in prop::collection::vec(
            (arb_record(), arb_any_amount(), arb_any_amount()),
            0..30,
        )
    ) {
        let records: Vec<PayrollRecord> = records
            .into_iter()
            .map(|(record, liquido, vantagem)| PayrollRecord { liquido, vantagem, ..record })
            .collect();

        let stats = compute_stats(&records);
        prop_assert_eq!(stats.total_records, records.len());
        prop_assert!(stats.sum_net.abs() <= OUTLIER_CEILING * Decimal::from(records.len().max(1)));
        for dimension in [Dimension::Competencia, Dimension::Year] {
            for bucket in aggregate_by_dimension(&records, dimension).values() {
                prop_assert!(!exceeds_ceiling(bucket.liquido / Decimal::from(bucket.count)));
            }
        }
    }

    #[test]
    fn unique_persons_never_exceed_records(records in arb_records()) {
        for dimension in [Dimension::Department, Dimension::Status, Dimension::RoleLevel] {
            for bucket in aggregate_by_dimension(&records, dimension).values() {
                prop_assert!(bucket.unique_person_count() <= bucket.count);
            }
        }
        let stats = compute_stats(&records);
        prop_assert!(stats.unique_persons <= stats.total_records);
        prop_assert!(stats.unique_contracts <= stats.total_records);
    }

    #[test]
    fn aggregation_is_order_independent(records in arb_records()) {
        let mut reversed = records.clone();
        reversed.reverse();

        let forward = aggregate_by_dimension(&records, Dimension::Department);
        let backward = aggregate_by_dimension(&reversed, Dimension::Department);

        prop_assert_eq!(forward.len(), backward.len());
        for (key, bucket) in &forward {
            let other = &backward[key];
            prop_assert_eq!(bucket.liquido, other.liquido);
            prop_assert_eq!(bucket.count, other.count);
            prop_assert_eq!(&bucket.unique_persons, &other.unique_persons);
        }
    }

    #[test]
    fn statistics_stay_within_bounds(records in arb_records()) {
        let stats = compute_stats(&records);
        prop_assert_eq!(stats.total_records, records.len());
        prop_assert!(stats.max_net <= OUTLIER_CEILING);
        prop_assert!(stats.min_net <= stats.median_net);
        prop_assert!(stats.median_net <= stats.max_net);
    }

    #[test]
    fn top_n_never_ranks_aggregate_rows(records in arb_records(), n in 0usize..15) {
        let top = top_n(&records, MoneyField::Liquido, n);
        prop_assert!(top.len() <= n);
        prop_assert!(top.iter().all(|entry| entry.nome != "*Totais*" && !entry.nome.is_empty()));
        prop_assert!(top.windows(2).all(|pair| pair[0].value >= pair[1].value));
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn cpf_normalization_is_deterministic(raw in r"[0-9 .\-/a-z]{0,20}") {
        let normalized = normalize_cpf(&raw);
        prop_assert_eq!(&normalized, &normalize_cpf(&raw));
        prop_assert!(normalized.is_empty() || normalized.len() == 11);
        prop_assert_eq!(normalize_cpf(&normalized), normalized.clone());
    }
}
