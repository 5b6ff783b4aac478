//! Store error kinds
//!
//! Every failure coming out of a `Store` is one of these kinds. The HTTP and
//! GraphQL layers map kinds to status codes / error codes; nothing above this
//! module inspects `sqlx::Error` directly.

use std::fmt;

/// Which database constraint rejected a write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    ForeignKey,
    Unique,
    NotNull,
    Check,
}

impl ConstraintKind {
    fn from_sqlx(kind: sqlx::error::ErrorKind) -> Option<Self> {
        use sqlx::error::ErrorKind;

        match kind {
            ErrorKind::ForeignKeyViolation => Some(Self::ForeignKey),
            ErrorKind::UniqueViolation => Some(Self::Unique),
            ErrorKind::NotNullViolation => Some(Self::NotNull),
            ErrorKind::CheckViolation => Some(Self::Check),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ForeignKey => "foreign_key",
            Self::Unique => "unique",
            Self::NotNull => "not_null",
            Self::Check => "check",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("{kind} constraint violated: {message}")]
    Constraint {
        kind: ConstraintKind,
        /// Constraint name when the database reports one
        constraint: Option<String>,
        message: String,
    },

    #[error("database unavailable: {0}")]
    Unavailable(String),

    #[error("database error: {0}")]
    Sqlx(sqlx::Error),
}

impl DbError {
    /// Foreign key violation raised when a post names a missing user.
    pub fn unknown_user(user_id: &str) -> Self {
        Self::Constraint {
            kind: ConstraintKind::ForeignKey,
            constraint: Some("posts_user_id_fkey".to_owned()),
            message: format!("user '{}' does not exist", user_id),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if let Some(kind) = ConstraintKind::from_sqlx(db.kind()) {
                return Self::Constraint {
                    kind,
                    constraint: db.constraint().map(str::to_owned),
                    message: db.message().to_owned(),
                };
            }
        }

        let unavailable = matches!(
            err,
            sqlx::Error::Io(_)
                | sqlx::Error::Tls(_)
                | sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
                | sqlx::Error::WorkerCrashed
        );

        if unavailable {
            Self::Unavailable(err.to_string())
        } else if matches!(err, sqlx::Error::RowNotFound) {
            Self::NotFound(err.to_string())
        } else {
            Self::Sqlx(err)
        }
    }
}
