//! Core logic for the department directory.
//! This crate owns department invariants and checked arithmetic helpers.

pub mod arith;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use arith::safe_add::{safe_add, ArithmeticRangeError, RangeDirection};
pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::department::{Department, DepartmentId, DepartmentValidationError};
pub use repo::department_repo::{
    DepartmentRepository, NameFilter, RepoError, RepoResult, SqliteDepartmentRepository,
};
pub use service::department_service::{DepartmentService, DirectoryError, DirectoryResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
