//! Repository for the `slots` and `slots_machines` tables.

use std::collections::HashMap;

use laundry_core::slot::SlotWindow;
use laundry_core::types::DbId;
use sqlx::{FromRow, PgPool};

use crate::models::machine::Machine;
use crate::models::slot::{Slot, SlotWithMachines};

/// Column list for the `slots` table.
const COLUMNS: &str = "id, weekday, start_time, end_time, created_at, updated_at";

/// Column list for the `machines` table (used in JOIN queries).
const MACHINE_COLUMNS: &str = "m.id, m.info, m.working, m.created_at, m.updated_at";

/// Catalog order: by weekday, then start time.
const ORDER: &str = "ORDER BY weekday, start_time, id";

/// A junction row joined with its machine.
#[derive(Debug, FromRow)]
struct SlotMachineRow {
    slot_id: DbId,
    #[sqlx(flatten)]
    machine: Machine,
}

/// Provides CRUD operations for slots and their machine associations.
pub struct SlotRepo;

impl SlotRepo {
    /// Insert a new slot.
    ///
    /// If `machine_ids` is non-empty, also creates junction rows in a transaction.
    pub async fn create(
        pool: &PgPool,
        window: &SlotWindow,
        machine_ids: &[DbId],
    ) -> Result<Slot, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO slots (weekday, start_time, end_time) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let slot = sqlx::query_as::<_, Slot>(&insert_query)
            .bind(window.weekday)
            .bind(window.start)
            .bind(window.end)
            .fetch_one(&mut *tx)
            .await?;

        if !machine_ids.is_empty() {
            Self::set_machines_inner(&mut tx, slot.id, machine_ids).await?;
        }

        tx.commit().await?;
        Ok(slot)
    }

    /// Find a slot by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Slot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM slots WHERE id = $1");
        sqlx::query_as::<_, Slot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a slot by ID, enriched with its machines.
    pub async fn find_by_id_with_machines(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SlotWithMachines>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(slot) => {
                let machines = Self::get_machines_for_slot(pool, slot.id).await?;
                Ok(Some(SlotWithMachines { slot, machines }))
            }
            None => Ok(None),
        }
    }

    /// List all slots in catalog order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Slot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM slots {ORDER}");
        sqlx::query_as::<_, Slot>(&query).fetch_all(pool).await
    }

    /// List all slots with their machines, in catalog order.
    ///
    /// Machines for the whole catalog are fetched in a single query and
    /// distributed in memory.
    pub async fn list_with_machines(pool: &PgPool) -> Result<Vec<SlotWithMachines>, sqlx::Error> {
        let slots = Self::list(pool).await?;

        let query = format!(
            "SELECT sm.slot_id, {MACHINE_COLUMNS} \
             FROM slots_machines sm \
             JOIN machines m ON m.id = sm.machine_id \
             ORDER BY sm.slot_id, m.id"
        );
        let rows = sqlx::query_as::<_, SlotMachineRow>(&query)
            .fetch_all(pool)
            .await?;

        let mut by_slot: HashMap<DbId, Vec<Machine>> = HashMap::new();
        for row in rows {
            by_slot.entry(row.slot_id).or_default().push(row.machine);
        }

        Ok(slots
            .into_iter()
            .map(|slot| {
                let machines = by_slot.remove(&slot.id).unwrap_or_default();
                SlotWithMachines { slot, machines }
            })
            .collect())
    }

    /// Replace a slot's window.
    ///
    /// If `machine_ids` is `Some`, replaces all machine associations.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        window: &SlotWindow,
        machine_ids: Option<&[DbId]>,
    ) -> Result<Option<Slot>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE slots SET \
                weekday = $2, \
                start_time = $3, \
                end_time = $4 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let slot = sqlx::query_as::<_, Slot>(&update_query)
            .bind(id)
            .bind(window.weekday)
            .bind(window.start)
            .bind(window.end)
            .fetch_optional(&mut *tx)
            .await?;

        if let (Some(slot), Some(machine_ids)) = (&slot, machine_ids) {
            Self::set_machines_inner(&mut tx, slot.id, machine_ids).await?;
        }

        tx.commit().await?;
        Ok(slot)
    }

    /// Delete a slot by ID. Its junction rows and bookings go with it.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM slots WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Machine association helpers
    // -----------------------------------------------------------------------

    /// Get all machines attached to a slot, ordered by ID.
    pub async fn get_machines_for_slot(
        pool: &PgPool,
        slot_id: DbId,
    ) -> Result<Vec<Machine>, sqlx::Error> {
        let query = format!(
            "SELECT {MACHINE_COLUMNS} \
             FROM machines m \
             JOIN slots_machines sm ON sm.machine_id = m.id \
             WHERE sm.slot_id = $1 \
             ORDER BY m.id"
        );
        sqlx::query_as::<_, Machine>(&query)
            .bind(slot_id)
            .fetch_all(pool)
            .await
    }

    /// Attach several machines to a slot in one transaction.
    ///
    /// Already attached machines are skipped. If any ID does not exist, the
    /// whole call fails and nothing is attached.
    pub async fn add_machines(
        pool: &PgPool,
        slot_id: DbId,
        machine_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        Self::insert_machines_inner(&mut tx, slot_id, machine_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Detach a machine from a slot.
    ///
    /// Returns `true` if the association was removed.
    pub async fn remove_machine(
        pool: &PgPool,
        slot_id: DbId,
        machine_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM slots_machines \
             WHERE slot_id = $1 AND machine_id = $2",
        )
        .bind(slot_id)
        .bind(machine_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Replace machine associations within an existing transaction.
    async fn set_machines_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        slot_id: DbId,
        machine_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM slots_machines WHERE slot_id = $1")
            .bind(slot_id)
            .execute(&mut **tx)
            .await?;

        Self::insert_machines_inner(tx, slot_id, machine_ids).await
    }

    /// Insert junction rows within an existing transaction, skipping pairs
    /// that already exist.
    async fn insert_machines_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        slot_id: DbId,
        machine_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO slots_machines (slot_id, machine_id) \
             SELECT $1, UNNEST($2::BIGINT[]) \
             ON CONFLICT DO NOTHING",
        )
        .bind(slot_id)
        .bind(machine_ids)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
