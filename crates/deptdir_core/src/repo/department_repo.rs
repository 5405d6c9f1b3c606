//! Department record store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/update/delete/find APIs over the `departments` table.
//! - Keep SQL and collation details inside the persistence boundary.
//!
//! # Invariants
//! - Ids are assigned by SQLite on insert and never rewritten.
//! - Name matching is byte-exact: `=` under BINARY collation for equality,
//!   `instr` for substrings. `LIKE` is not used.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::department::{Department, DepartmentId, DepartmentValidationError};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DEPARTMENT_SELECT_SQL: &str = "SELECT id, name, description FROM departments";
const DEPARTMENTS_TABLE: &str = "departments";
const REQUIRED_COLUMNS: [&str; 3] = ["id", "name", "description"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for department persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(DepartmentValidationError),
    Db(DbError),
    NotFound(DepartmentId),
    /// Storage-level unique index on `name` rejected the write.
    DuplicateName(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "department not found: {id}"),
            Self::DuplicateName(name) => {
                write!(f, "a department with the name '{name}' already exists")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "department repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "department repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "department repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted department data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DepartmentValidationError> for RepoError {
    fn from(value: DepartmentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Predicate over department names used by [`DepartmentRepository::find_where`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameFilter {
    /// Case-sensitive exact match.
    Equals(String),
    /// Case-sensitive substring match; an empty needle matches every row.
    Contains(String),
}

impl NameFilter {
    /// Evaluates the predicate against one name in memory.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Equals(value) => name == value,
            Self::Contains(needle) => name.contains(needle.as_str()),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Equals(_) => "equals",
            Self::Contains(_) => "contains",
        }
    }
}

/// Record store contract for departments.
///
/// Every call is treated as immediately durable by callers.
#[cfg_attr(test, mockall::automock)]
pub trait DepartmentRepository {
    /// Inserts a new row and returns the store-assigned id.
    fn insert(&self, department: &Department) -> RepoResult<DepartmentId>;
    /// Replaces the row whose id equals `department.id`.
    fn update(&self, department: &Department) -> RepoResult<()>;
    fn delete(&self, id: DepartmentId) -> RepoResult<()>;
    fn find_all(&self) -> RepoResult<Vec<Department>>;
    fn find_by_id(&self, id: DepartmentId) -> RepoResult<Option<Department>>;
    fn find_where(&self, filter: &NameFilter) -> RepoResult<Vec<Department>>;
}

/// SQLite-backed department repository.
pub struct SqliteDepartmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDepartmentRepository<'conn> {
    /// Creates repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is not current.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` on schema drift.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_department_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl DepartmentRepository for SqliteDepartmentRepository<'_> {
    fn insert(&self, department: &Department) -> RepoResult<DepartmentId> {
        department.validate()?;

        self.conn
            .execute(
                "INSERT INTO departments (name, description) VALUES (?1, ?2);",
                params![department.name.as_deref(), department.description.as_deref()],
            )
            .map_err(|err| map_write_error(err, department))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, department: &Department) -> RepoResult<()> {
        department.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE departments
                 SET
                    name = ?1,
                    description = ?2
                 WHERE id = ?3;",
                params![
                    department.name.as_deref(),
                    department.description.as_deref(),
                    department.id,
                ],
            )
            .map_err(|err| map_write_error(err, department))?;

        if changed == 0 {
            return Err(RepoError::NotFound(department.id));
        }

        Ok(())
    }

    fn delete(&self, id: DepartmentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM departments WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn find_all(&self) -> RepoResult<Vec<Department>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEPARTMENT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        collect_rows(&mut rows)
    }

    fn find_by_id(&self, id: DepartmentId) -> RepoResult<Option<Department>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEPARTMENT_SELECT_SQL} WHERE id = ?1;"))?;

        stmt.query_row([id], |row| Ok(parse_department_row(row)))
            .optional()?
            .transpose()
    }

    fn find_where(&self, filter: &NameFilter) -> RepoResult<Vec<Department>> {
        let (predicate, value) = match filter {
            NameFilter::Equals(value) => ("name = ?1", value),
            NameFilter::Contains(needle) => ("instr(name, ?1) > 0", needle),
        };

        let mut stmt = self.conn.prepare(&format!(
            "{DEPARTMENT_SELECT_SQL} WHERE {predicate} ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([value.as_str()])?;
        let departments = collect_rows(&mut rows)?;

        debug!(
            "event=department_find module=repo status=ok filter={} hits={}",
            filter.kind(),
            departments.len()
        );
        Ok(departments)
    }
}

fn collect_rows(rows: &mut rusqlite::Rows<'_>) -> RepoResult<Vec<Department>> {
    let mut departments = Vec::new();
    while let Some(row) = rows.next()? {
        departments.push(parse_department_row(row)?);
    }
    Ok(departments)
}

fn parse_department_row(row: &Row<'_>) -> RepoResult<Department> {
    let department = Department {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
    };

    department.validate().map_err(|err| {
        RepoError::InvalidData(format!(
            "department {} violates `{}`: {}",
            department.id, err.field, err.message
        ))
    })?;
    Ok(department)
}

fn map_write_error(err: rusqlite::Error, department: &Department) -> RepoError {
    if is_unique_violation(&err) {
        return RepoError::DuplicateName(department.name_str().to_string());
    }
    err.into()
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn ensure_department_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, DEPARTMENTS_TABLE)? {
        return Err(RepoError::MissingRequiredTable(DEPARTMENTS_TABLE));
    }

    for column in REQUIRED_COLUMNS {
        if !table_has_column(conn, DEPARTMENTS_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: DEPARTMENTS_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::NameFilter;

    #[test]
    fn equals_filter_is_exact_and_case_sensitive() {
        let filter = NameFilter::Equals("Finance".to_string());
        assert!(filter.matches("Finance"));
        assert!(!filter.matches("finance"));
        assert!(!filter.matches("Finance "));
    }

    #[test]
    fn contains_filter_is_case_sensitive_and_accepts_empty_needle() {
        let filter = NameFilter::Contains("Soft".to_string());
        assert!(filter.matches("Software Testing"));
        assert!(!filter.matches("software testing"));
        assert!(NameFilter::Contains(String::new()).matches("anything"));
    }
}
