//! User account repository.

use crate::error::AppError;
use crate::models::user::{User, UserRole};
use crate::types::UserId;
use sqlx::PgPool;

const TABLE_NAME: &str = "cinema_users";
const SELECT_COLUMNS: &str =
    "id, email, password_hash, first_name, last_name, role, created_at, updated_at";

#[derive(Debug, Default, Clone, Copy)]
pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_by_email(&self, db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let query = format!(
            "SELECT {} FROM {} WHERE email = $1",
            SELECT_COLUMNS, TABLE_NAME
        );
        let row = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    pub async fn find_by_id(&self, db: &PgPool, id: UserId) -> Result<User, AppError> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", SELECT_COLUMNS, TABLE_NAME);
        let row = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        Ok(row)
    }

    /// Inserts a new account. A duplicate email surfaces as Conflict via the
    /// store-level unique constraint.
    pub async fn create(
        &self,
        db: &PgPool,
        email: &str,
        password_hash: &str,
        first_name: &str,
        last_name: &str,
        role: UserRole,
    ) -> Result<User, AppError> {
        let query = format!(
            "INSERT INTO {} (email, password_hash, first_name, last_name, role) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(password_hash)
            .bind(first_name)
            .bind(last_name)
            .bind(role)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        db: &PgPool,
        id: UserId,
        email: &str,
        password_hash: &str,
        first_name: &str,
        last_name: &str,
        role: UserRole,
    ) -> Result<User, AppError> {
        let query = format!(
            "UPDATE {} SET email = $2, password_hash = $3, first_name = $4, last_name = $5, \
             role = $6, updated_at = now() WHERE id = $1 RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(email)
            .bind(password_hash)
            .bind(first_name)
            .bind(last_name)
            .bind(role)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        Ok(row)
    }

    /// Returns whether a row was actually removed; zero rows affected is a
    /// logical outcome for the caller, not a store fault.
    pub async fn delete(&self, db: &PgPool, id: UserId) -> Result<bool, AppError> {
        let query = format!("DELETE FROM {} WHERE id = $1", TABLE_NAME);
        let result = sqlx::query(&query).bind(id).execute(db).await?;
        Ok(result.rows_affected() > 0)
    }
}
