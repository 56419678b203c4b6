//! Repository errors and constraint-violation mapping
//!
//! | Postgres condition              | Statement role | DbError              |
//! |---------------------------------|----------------|----------------------|
//! | unique violation (23505)        | any            | `Conflict`           |
//! | foreign key violation (23503)   | delete parent  | `BlockedByReference` |
//! | foreign key violation (23503)   | write child    | `InvalidReference`   |
//! | not-null / check (23502, 23514) | any            | `InvalidInput`       |
//! | numeric out of range (22003)    | any            | `InvalidInput`       |
//! | anything else                   | any            | `Sqlx` (unmapped)    |
//!
//! Postgres reports both foreign-key directions with the same code, so
//! the caller states which side of the reference its statement is on.

use sqlx::error::ErrorKind;

/// Postgres SQLSTATE for numeric_value_out_of_range
const NUMERIC_OUT_OF_RANGE: &str = "22003";

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("{resource} already exists{}", on_constraint(.constraint))]
    Conflict {
        resource: &'static str,
        constraint: Option<String>,
    },

    #[error("{resource} is still referenced by stock records{}", on_constraint(.constraint))]
    BlockedByReference {
        resource: &'static str,
        constraint: Option<String>,
    },

    #[error("{resource} references a record that does not exist{}", on_constraint(.constraint))]
    InvalidReference {
        resource: &'static str,
        constraint: Option<String>,
    },

    #[error("invalid {resource}: {message}")]
    InvalidInput {
        resource: &'static str,
        message: String,
    },
}

fn on_constraint(constraint: &Option<String>) -> String {
    constraint
        .as_deref()
        .map(|c| format!(" ({c})"))
        .unwrap_or_default()
}

/// Which side of a foreign key the failing statement was writing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignKeyRole {
    /// Deleting a parent row that child rows still point at
    Parent,
    /// Writing a child row whose parent must exist
    Child,
}

/// Constraint violations the mapper knows how to translate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Unique,
    ForeignKey,
    NotNull,
    Check,
    OutOfRange,
}

impl Violation {
    /// Classify a sqlx error; `None` for anything that is not a known violation.
    pub fn of(err: &sqlx::Error) -> Option<Self> {
        let sqlx::Error::Database(db_err) = err else {
            return None;
        };

        match db_err.kind() {
            ErrorKind::UniqueViolation => Some(Self::Unique),
            ErrorKind::ForeignKeyViolation => Some(Self::ForeignKey),
            ErrorKind::NotNullViolation => Some(Self::NotNull),
            ErrorKind::CheckViolation => Some(Self::Check),
            _ if db_err.code().as_deref() == Some(NUMERIC_OUT_OF_RANGE) => Some(Self::OutOfRange),
            _ => None,
        }
    }
}

impl DbError {
    /// Map a failed write statement to a repository error.
    pub fn from_write(err: sqlx::Error, resource: &'static str, role: ForeignKeyRole) -> Self {
        let Some(violation) = Violation::of(&err) else {
            return Self::Sqlx(err);
        };

        let (constraint, message) = match &err {
            sqlx::Error::Database(db_err) => (
                db_err.constraint().map(str::to_owned),
                db_err.message().to_owned(),
            ),
            _ => (None, err.to_string()),
        };

        tracing::debug!(resource, ?violation, ?constraint, "constraint violation");
        Self::from_violation(violation, resource, role, constraint, message)
    }

    fn from_violation(
        violation: Violation,
        resource: &'static str,
        role: ForeignKeyRole,
        constraint: Option<String>,
        message: String,
    ) -> Self {
        match (violation, role) {
            (Violation::Unique, _) => Self::Conflict {
                resource,
                constraint,
            },
            (Violation::ForeignKey, ForeignKeyRole::Parent) => Self::BlockedByReference {
                resource,
                constraint,
            },
            (Violation::ForeignKey, ForeignKeyRole::Child) => Self::InvalidReference {
                resource,
                constraint,
            },
            (Violation::NotNull | Violation::Check | Violation::OutOfRange, _) => {
                Self::InvalidInput { resource, message }
            }
        }
    }

    pub(crate) fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}
