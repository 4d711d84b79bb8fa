//! Repository for the `machines` table.

use laundry_core::types::DbId;
use sqlx::PgPool;

use crate::models::machine::{Machine, MachineFields};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, info, working, created_at, updated_at";

/// Provides CRUD operations for machines.
pub struct MachineRepo;

impl MachineRepo {
    /// Insert a new machine, returning the created row.
    pub async fn create(pool: &PgPool, input: &MachineFields) -> Result<Machine, sqlx::Error> {
        let query = format!(
            "INSERT INTO machines (info, working)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Machine>(&query)
            .bind(&input.info)
            .bind(input.working)
            .fetch_one(pool)
            .await
    }

    /// Find a machine by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Machine>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM machines WHERE id = $1");
        sqlx::query_as::<_, Machine>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all machines ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<Machine>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM machines ORDER BY id");
        sqlx::query_as::<_, Machine>(&query).fetch_all(pool).await
    }

    /// Replace a machine's info and working state.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &MachineFields,
    ) -> Result<Option<Machine>, sqlx::Error> {
        let query = format!(
            "UPDATE machines SET info = $2, working = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Machine>(&query)
            .bind(id)
            .bind(&input.info)
            .bind(input.working)
            .fetch_optional(pool)
            .await
    }

    /// Delete a machine by ID, detaching it from every slot.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM machines WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
