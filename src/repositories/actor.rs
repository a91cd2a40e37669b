//! Actor repository.

use crate::error::AppError;
use crate::models::actor::Actor;
use crate::types::ActorId;
use sqlx::postgres::PgTransaction;
use sqlx::PgPool;

const TABLE_NAME: &str = "actor";
const SELECT_COLUMNS: &str = "id, name";

#[derive(Debug, Default, Clone, Copy)]
pub struct ActorRepository;

impl ActorRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn select_all(
        &self,
        db: &PgPool,
        search: Option<&str>,
    ) -> Result<Vec<Actor>, AppError> {
        let rows = match search {
            Some(term) => {
                let query = format!(
                    "SELECT {} FROM {} WHERE name ILIKE $1 ORDER BY name",
                    SELECT_COLUMNS, TABLE_NAME
                );
                sqlx::query_as::<_, Actor>(&query)
                    .bind(format!("%{}%", term))
                    .fetch_all(db)
                    .await?
            }
            None => {
                let query = format!("SELECT {} FROM {} ORDER BY name", SELECT_COLUMNS, TABLE_NAME);
                sqlx::query_as::<_, Actor>(&query).fetch_all(db).await?
            }
        };
        Ok(rows)
    }

    /// Find-or-insert by name. The upsert makes the lookup race-free: two
    /// concurrent saves of the same actor converge on one row.
    pub async fn find_or_create_in_tx(
        &self,
        tx: &mut PgTransaction<'_>,
        name: &str,
    ) -> Result<ActorId, AppError> {
        let id = sqlx::query_scalar::<_, ActorId>(
            "INSERT INTO actor (name) VALUES ($1) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING id",
        )
        .bind(name)
        .fetch_one(&mut **tx)
        .await?;
        Ok(id)
    }
}
