//! Transaction management utilities for repositories.
//!
//! Every multi-statement unit (seat-layout replace, movie+cast save, cascade
//! deletes) runs inside one of these transactions: commit only after every
//! statement succeeds, rollback on any failure.

use crate::error::AppError;
use sqlx::postgres::PgTransaction;
use sqlx::PgPool;

/// Begin a new database transaction.
pub async fn begin_transaction(db: &PgPool) -> Result<PgTransaction<'_>, AppError> {
    db.begin()
        .await
        .map_err(|e| AppError::InternalServerError(e.into()))
}

/// Commit a transaction, making all changes within it visible.
pub async fn commit_transaction(tx: PgTransaction<'_>) -> Result<(), AppError> {
    tx.commit()
        .await
        .map_err(|e| AppError::InternalServerError(e.into()))
}
