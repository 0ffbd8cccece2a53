//! Identifier normalization.
//!
//! Source data is known to be inconsistent, so nothing in this module
//! fails: malformed CPFs fall back to other identity keys and unknown
//! department labels pass through unchanged.

mod cpf;
mod department;
mod person;

pub use cpf::{CPF_LENGTH, format_cpf, is_valid_cpf, normalize_cpf};
pub use department::{
    DEPARTMENT_ALIASES, DEPARTMENT_HIERARCHY, NO_DEPARTMENT_LABEL, UMBRELLA_LABEL,
    department_children, parent_of, raw_labels_for, resolve_department,
};
pub use person::{PersonKey, person_key};
