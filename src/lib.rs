//! Payroll Aggregation Engine for University HR Reports
//!
//! This crate loads monthly payroll and contract-expenditure extracts,
//! filters them with an explicit criteria object, and computes the
//! aggregate buckets, summary statistics and rankings that the payroll
//! dashboard renders.
//!
//! # Example
//!
//! ```
//! use folha_engine::engine::{Dimension, aggregate_by_dimension, compute_stats, filter_records};
//! use folha_engine::models::{FilterCriteria, PayrollRecord};
//! use rust_decimal::Decimal;
//!
//! let records = vec![
//!     PayrollRecord {
//!         nome: "ANA LIMA".into(),
//!         cpf: "123.456.789-01".into(),
//!         competencia: "2025-04".into(),
//!         lotacao_normalizada: "PORTUGAL RAMALHO".into(),
//!         liquido: Some(Decimal::new(350000, 2)),
//!         ..Default::default()
//!     },
//! ];
//!
//! let filtered = filter_records(&records, &FilterCriteria::default().with_year("2025"));
//! let by_department = aggregate_by_dimension(&filtered, Dimension::Department);
//! assert_eq!(by_department["HEPR"].liquido, Decimal::new(350000, 2));
//! assert_eq!(compute_stats(&filtered).unique_persons, 1);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod models;
pub mod normalize;
