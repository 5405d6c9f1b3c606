//! Department domain model.
//!
//! # Responsibility
//! - Define the department record shape shared by service and repository.
//! - Provide the ordered field validation applied before every write.
//!
//! # Invariants
//! - `id == 0` means "not yet persisted"; stores assign ids on insert.
//! - `name` is required and at most 100 characters.
//! - `description` is optional and at most 500 characters when present.
//! - `description: None` and `Some("")` are distinct values.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned department identifier.
pub type DepartmentId = i64;

/// Id carried by a department that has not been inserted yet.
pub const UNSAVED_DEPARTMENT_ID: DepartmentId = 0;

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// A department record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Department {
    /// Assigned by the store on first insert, immutable afterwards.
    pub id: DepartmentId,
    /// Kept optional so a caller-built draft can be rejected as missing
    /// rather than silently defaulted.
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Department {
    /// Creates an unsaved department without description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UNSAVED_DEPARTMENT_ID,
            name: Some(name.into()),
            description: None,
        }
    }

    /// Creates an unsaved department with a description.
    pub fn with_description(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::new(name)
        }
    }

    /// Returns whether a store has assigned an id to this department.
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_DEPARTMENT_ID
    }

    /// Name as a borrowed string, `""` when absent.
    pub fn name_str(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Runs field rules in declaration order and returns the first violation.
    ///
    /// # Errors
    /// - `name` missing, empty or whitespace-only.
    /// - `name` longer than 100 characters.
    /// - `description` longer than 500 characters.
    pub fn validate(&self) -> Result<(), DepartmentValidationError> {
        DEPARTMENT_RULES
            .iter()
            .find_map(|rule| rule.check(self).err())
            .map_or(Ok(()), Err)
    }
}

/// First field rule violated by a department.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepartmentValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl Display for DepartmentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (field `{}`)", self.message, self.field)
    }
}

impl Error for DepartmentValidationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Description,
}

impl Field {
    fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
        }
    }

    fn value(self, department: &Department) -> Option<&str> {
        match self {
            Self::Name => department.name.as_deref(),
            Self::Description => department.description.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum RuleKind {
    /// Present and not blank.
    Required,
    /// Character count upper bound; absent values pass.
    MaxChars(usize),
}

#[derive(Debug, Clone, Copy)]
struct FieldRule {
    field: Field,
    kind: RuleKind,
    message: &'static str,
}

impl FieldRule {
    fn check(&self, department: &Department) -> Result<(), DepartmentValidationError> {
        let value = self.field.value(department);
        let ok = match self.kind {
            RuleKind::Required => value.is_some_and(|text| !text.trim().is_empty()),
            RuleKind::MaxChars(max) => value.map_or(true, |text| text.chars().count() <= max),
        };

        if ok {
            Ok(())
        } else {
            Err(DepartmentValidationError {
                field: self.field.as_str(),
                message: self.message,
            })
        }
    }
}

const DEPARTMENT_RULES: &[FieldRule] = &[
    FieldRule {
        field: Field::Name,
        kind: RuleKind::Required,
        message: "Department name cannot be null or empty.",
    },
    FieldRule {
        field: Field::Name,
        kind: RuleKind::MaxChars(NAME_MAX_CHARS),
        message: "Department name cannot exceed 100 characters.",
    },
    FieldRule {
        field: Field::Description,
        kind: RuleKind::MaxChars(DESCRIPTION_MAX_CHARS),
        message: "Department description cannot exceed 500 characters.",
    },
];
