//! Repository for the `bookers` table.

use laundry_core::types::DbId;
use sqlx::PgPool;

use crate::models::booker::{Booker, CreateBooker, UpdateBooker};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, identifier, name, email, phone, pin, created_at, updated_at";

/// Provides CRUD operations for bookers.
pub struct BookerRepo;

impl BookerRepo {
    /// Insert a new booker, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBooker) -> Result<Booker, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookers (identifier, name, email, phone, pin)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booker>(&query)
            .bind(input.identifier.trim())
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.pin)
            .fetch_one(pool)
            .await
    }

    /// Find a booker by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booker>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookers WHERE id = $1");
        sqlx::query_as::<_, Booker>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all bookers ordered by identifier.
    pub async fn list(pool: &PgPool) -> Result<Vec<Booker>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookers ORDER BY identifier, id");
        sqlx::query_as::<_, Booker>(&query).fetch_all(pool).await
    }

    /// Update a booker's contact fields.
    ///
    /// Absent fields keep their value. `name`, `email` and `phone` use
    /// `Option<Option<String>>` so a present `None` clears the column.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBooker,
    ) -> Result<Option<Booker>, sqlx::Error> {
        let query = format!(
            "UPDATE bookers SET
                name = CASE WHEN $2 THEN $3 ELSE name END,
                email = CASE WHEN $4 THEN $5 ELSE email END,
                phone = CASE WHEN $6 THEN $7 ELSE phone END,
                pin = COALESCE($8, pin)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booker>(&query)
            .bind(id)
            .bind(input.name.is_some())
            .bind(input.name.as_ref().and_then(|v| v.as_deref()))
            .bind(input.email.is_some())
            .bind(input.email.as_ref().and_then(|v| v.as_deref()))
            .bind(input.phone.is_some())
            .bind(input.phone.as_ref().and_then(|v| v.as_deref()))
            .bind(&input.pin)
            .fetch_optional(pool)
            .await
    }

    /// Delete a booker by ID. Their bookings are removed by cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
