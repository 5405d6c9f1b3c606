//! Department directory use-case service.
//!
//! # Responsibility
//! - Validate departments before any store access.
//! - Enforce name uniqueness across other live records.
//! - Translate repository failures into directory-level errors.
//!
//! # Invariants
//! - Only the first validation violation is surfaced (`name`, then
//!   `description`).
//! - Uniqueness is a read-then-write check and is not atomic across
//!   concurrent writers; stores with a unique index report the race as
//!   `DuplicateName` too.
//! - Ids are written back into the caller's value only after a successful
//!   insert, and are never changed afterwards.
//! - Log lines carry ids, counts and lengths, never names or descriptions.

use crate::model::department::{Department, DepartmentId, DepartmentValidationError};
use crate::repo::department_repo::{DepartmentRepository, NameFilter, RepoError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Service error for department directory operations.
#[derive(Debug)]
pub enum DirectoryError {
    /// A required argument was absent.
    NullArgument(&'static str),
    /// First violated field rule.
    Validation(DepartmentValidationError),
    /// Another live record already uses this name.
    DuplicateName { name: String },
    /// `add` was given a department that already carries a store id.
    AlreadyPersisted(DepartmentId),
    /// Target id does not exist in the store.
    NotFound(DepartmentId),
    /// Store failure, passed through uninterpreted.
    Store(RepoError),
}

impl DirectoryError {
    /// Stable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NullArgument(_) => "null_argument",
            Self::Validation(_) => "validation",
            Self::DuplicateName { .. } => "duplicate_name",
            Self::AlreadyPersisted(_) => "already_persisted",
            Self::NotFound(_) => "not_found",
            Self::Store(_) => "store",
        }
    }
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NullArgument(argument) => write!(f, "argument `{argument}` cannot be null"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateName { name } => {
                write!(f, "a department with the name '{name}' already exists")
            }
            Self::AlreadyPersisted(id) => {
                write!(f, "department {id} is already persisted; use update instead")
            }
            Self::NotFound(id) => write!(f, "department not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DirectoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DepartmentValidationError> for DirectoryError {
    fn from(value: DepartmentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for DirectoryError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::DuplicateName(name) => Self::DuplicateName { name },
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Store(other),
        }
    }
}

/// Validating facade over a department record store.
pub struct DepartmentService<R: DepartmentRepository> {
    repo: R,
}

impl<R: DepartmentRepository> DepartmentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates, checks uniqueness and inserts `department`.
    ///
    /// On success the store-assigned id is written into `department.id` and
    /// returned.
    ///
    /// # Errors
    /// - `NullArgument("department")` when `department` is `None`.
    /// - `AlreadyPersisted` when `department.id` is already assigned; the
    ///   value and the store are left untouched.
    /// - `Validation` for the first violated field rule.
    /// - `DuplicateName` when any stored record has the same name.
    /// - `Store` for repository failures.
    pub fn add<'a>(
        &self,
        department: impl Into<Option<&'a mut Department>>,
    ) -> DirectoryResult<DepartmentId> {
        let department = department
            .into()
            .ok_or(DirectoryError::NullArgument("department"));
        match department.and_then(|department| self.try_add(department)) {
            Ok(id) => {
                info!("event=department_add module=service status=ok id={id}");
                Ok(id)
            }
            Err(err) => {
                log_rejection("department_add", &err);
                Err(err)
            }
        }
    }

    /// Validates, checks uniqueness and fully replaces the stored record with
    /// the same id.
    ///
    /// # Errors
    /// - `NullArgument("department")` when `department` is `None`.
    /// - `Validation` for the first violated field rule.
    /// - `DuplicateName` when a record with another id has the same name.
    /// - `NotFound` when no record has `department.id`.
    /// - `Store` for repository failures.
    pub fn update<'a>(
        &self,
        department: impl Into<Option<&'a Department>>,
    ) -> DirectoryResult<()> {
        let department = department
            .into()
            .ok_or(DirectoryError::NullArgument("department"));
        match department.and_then(|department| self.try_update(department)) {
            Ok(id) => {
                info!("event=department_update module=service status=ok id={id}");
                Ok(())
            }
            Err(err) => {
                log_rejection("department_update", &err);
                Err(err)
            }
        }
    }

    /// Hard-deletes the stored record matching `department.id`.
    ///
    /// # Errors
    /// - `NullArgument("department")` when `department` is `None`.
    /// - `NotFound` when no record has that id.
    /// - `Store` for repository failures.
    pub fn delete<'a>(
        &self,
        department: impl Into<Option<&'a Department>>,
    ) -> DirectoryResult<()> {
        let department = department
            .into()
            .ok_or(DirectoryError::NullArgument("department"));
        let result = department.and_then(|department| {
            self.repo.delete(department.id)?;
            Ok(department.id)
        });

        match result {
            Ok(id) => {
                info!("event=department_delete module=service status=ok id={id}");
                Ok(())
            }
            Err(err) => {
                log_rejection("department_delete", &err);
                Err(err)
            }
        }
    }

    /// Returns a snapshot of every stored department.
    pub fn get_all(&self) -> DirectoryResult<Vec<Department>> {
        let result = self.repo.find_all().map_err(DirectoryError::from);
        logged("department_get_all", result)
    }

    /// Returns the department with `id`, or `None`.
    pub fn get_by_id(&self, id: DepartmentId) -> DirectoryResult<Option<Department>> {
        let result = self.repo.find_by_id(id).map_err(DirectoryError::from);
        logged("department_get_by_id", result)
    }

    /// Returns the first department whose name equals `name` exactly.
    ///
    /// # Errors
    /// - `NullArgument("name")` when `name` is `None`.
    pub fn get_by_name<'a>(
        &self,
        name: impl Into<Option<&'a str>>,
    ) -> DirectoryResult<Option<Department>> {
        let result = name
            .into()
            .ok_or(DirectoryError::NullArgument("name"))
            .and_then(|name| {
                let matches = self
                    .repo
                    .find_where(&NameFilter::Equals(name.to_string()))?;
                Ok(matches.into_iter().next())
            });
        logged("department_get_by_name", result)
    }

    /// Returns every department whose name contains `keyword`.
    ///
    /// Matching is case-sensitive; an empty keyword matches all records.
    ///
    /// # Errors
    /// - `NullArgument("keyword")` when `keyword` is `None`.
    pub fn search_by_name<'a>(
        &self,
        keyword: impl Into<Option<&'a str>>,
    ) -> DirectoryResult<Vec<Department>> {
        let result = keyword
            .into()
            .ok_or(DirectoryError::NullArgument("keyword"))
            .and_then(|keyword| {
                let hits = self
                    .repo
                    .find_where(&NameFilter::Contains(keyword.to_string()))?;
                info!(
                    "event=department_search module=service status=ok keyword_chars={} hits={}",
                    keyword.chars().count(),
                    hits.len()
                );
                Ok(hits)
            });
        logged("department_search", result)
    }

    fn try_add(&self, department: &mut Department) -> DirectoryResult<DepartmentId> {
        if department.is_persisted() {
            return Err(DirectoryError::AlreadyPersisted(department.id));
        }
        department.validate()?;
        self.ensure_name_available(department, None)?;

        let id = self.repo.insert(department)?;
        department.id = id;
        Ok(id)
    }

    fn try_update(&self, department: &Department) -> DirectoryResult<DepartmentId> {
        department.validate()?;
        self.ensure_name_available(department, Some(department.id))?;

        self.repo.update(department)?;
        Ok(department.id)
    }

    fn ensure_name_available(
        &self,
        department: &Department,
        exclude_id: Option<DepartmentId>,
    ) -> DirectoryResult<()> {
        let name = department.name_str();
        let conflict = self
            .repo
            .find_where(&NameFilter::Equals(name.to_string()))?
            .into_iter()
            .any(|existing| Some(existing.id) != exclude_id);

        if conflict {
            return Err(DirectoryError::DuplicateName {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

fn logged<T>(event: &str, result: DirectoryResult<T>) -> DirectoryResult<T> {
    if let Err(err) = &result {
        log_rejection(event, err);
    }
    result
}

fn log_rejection(event: &str, err: &DirectoryError) {
    match err {
        DirectoryError::Store(source) => error!(
            "event={event} module=service status=error error_code={} error={source}",
            err.code()
        ),
        DirectoryError::Validation(violation) => warn!(
            "event={event} module=service status=rejected error_code={} field={}",
            err.code(),
            violation.field
        ),
        DirectoryError::NotFound(id) | DirectoryError::AlreadyPersisted(id) => warn!(
            "event={event} module=service status=rejected error_code={} id={id}",
            err.code()
        ),
        _ => warn!(
            "event={event} module=service status=rejected error_code={}",
            err.code()
        ),
    }
}
