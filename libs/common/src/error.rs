//! Storage error types shared by the user and note stores
//!
//! Every store implementation, relational or in-memory, reports failures
//! through [`StoreError`] so that services can map outcomes without knowing
//! which backend is in use.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Error returned by store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write
    #[error("record already exists")]
    Duplicate,

    /// No row matched the query
    #[error("record not found")]
    NotFound,

    /// The write references a record that does not exist, such as a note
    /// for a user who has since been deleted
    #[error("referenced record does not exist")]
    MissingReference,

    /// The underlying database failed; `op` names the failing operation
    #[error("{op}: {source}")]
    Unavailable {
        op: &'static str,
        #[source]
        source: SqlxError,
    },

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

impl StoreError {
    /// Wrap a lower-level database error, tagging it with the operation name.
    ///
    /// Unique and foreign key constraint violations are recognised and
    /// reported as [`StoreError::Duplicate`] and
    /// [`StoreError::MissingReference`] instead.
    pub fn from_sqlx(op: &'static str, source: SqlxError) -> Self {
        match &source {
            SqlxError::Database(db) if db.is_unique_violation() => StoreError::Duplicate,
            SqlxError::Database(db) if db.is_foreign_key_violation() => {
                StoreError::MissingReference
            }
            SqlxError::RowNotFound => StoreError::NotFound,
            _ => StoreError::Unavailable { op, source },
        }
    }

    /// Adapter for `map_err`, e.g. `.map_err(StoreError::tag("notes.get"))`
    pub fn tag(op: &'static str) -> impl Fn(SqlxError) -> Self {
        move |source| Self::from_sqlx(op, source)
    }
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = StoreError::from_sqlx("users.find", SqlxError::RowNotFound);
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn other_errors_keep_operation_tag() {
        let err = StoreError::tag("notes.list")(SqlxError::PoolTimedOut);
        match &err {
            StoreError::Unavailable { op, .. } => assert_eq!(*op, "notes.list"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().starts_with("notes.list: "));
    }
}
