//! Repository layer for department persistence.
//!
//! # Responsibility
//! - Define the record store contract the directory service depends on.
//! - Isolate SQLite query details from validation and uniqueness orchestration.
//!
//! # Invariants
//! - Repository writes run `Department::validate()` before SQL mutations.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateName`) in
//!   addition to DB transport errors.

pub mod department_repo;
