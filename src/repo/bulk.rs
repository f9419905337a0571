//! Bulk mutation outcome. A batch either commits in full or rolls back at
//! the first failing item; the failing id is reported to the caller.

use crate::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BulkError {
    #[error("record {0} not found")]
    NotFound(i64),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    /// The commit itself failed after every item succeeded. Distinct from a
    /// mid-batch failure so callers can tell the two apart.
    #[error("commit: {0}")]
    Commit(sqlx::Error),
}

impl BulkError {
    /// The id of the item that aborted the batch, if there was one.
    pub fn failed_id(&self) -> Option<i64> {
        match self {
            BulkError::NotFound(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<BulkError> for AppError {
    fn from(e: BulkError) -> Self {
        match e {
            BulkError::NotFound(id) => AppError::NotFound(format!("record {id}")),
            BulkError::Db(e) | BulkError::Commit(e) => AppError::Db(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_reports_the_failing_id() {
        assert_eq!(BulkError::NotFound(2).failed_id(), Some(2));
        assert_eq!(BulkError::Commit(sqlx::Error::PoolClosed).failed_id(), None);
    }

    #[test]
    fn not_found_maps_to_http_not_found() {
        let app: AppError = BulkError::NotFound(7).into();
        assert!(matches!(app, AppError::NotFound(msg) if msg.contains('7')));
    }
}
