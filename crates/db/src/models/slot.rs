//! Slot template model and DTOs.
//!
//! A slot is a recurring weekly window (weekday + start/end time of day).
//! Machines are attached through the `slots_machines` junction table.

use laundry_core::error::CoreError;
use laundry_core::schedule::SlotTemplate;
use laundry_core::slot::{validate_slot, SlotWindow};
use laundry_core::time_of_day;
use laundry_core::types::{DbId, TimeOfDay, Timestamp};
use laundry_core::validation::require;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::machine::Machine;

/// A row from the `slots` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Slot {
    pub id: DbId,
    /// `0` = Monday ... `6` = Sunday.
    pub weekday: i16,
    #[sqlx(rename = "start_time")]
    #[serde(serialize_with = "time_of_day::serialize")]
    pub start: TimeOfDay,
    #[sqlx(rename = "end_time")]
    #[serde(serialize_with = "time_of_day::serialize")]
    pub end: TimeOfDay,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A slot enriched with its attached machines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotWithMachines {
    #[serde(flatten)]
    pub slot: Slot,
    pub machines: Vec<Machine>,
}

impl SlotTemplate for SlotWithMachines {
    fn slot_id(&self) -> DbId {
        self.slot.id
    }

    fn weekday(&self) -> i16 {
        self.slot.weekday
    }
}

/// DTO for creating a new slot.
///
/// Times are accepted as `"HH:MM"` or `"HH:MM:SS"`. `week_day` is accepted
/// as an alias of `weekday`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSlot {
    #[serde(alias = "week_day")]
    pub weekday: Option<i16>,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    /// Machine IDs to attach to the new slot.
    #[serde(default)]
    pub machine_ids: Vec<DbId>,
}

impl CreateSlot {
    /// Validate the window, see [`validate_slot`].
    pub fn window(&self, min_duration_minutes: u32) -> Result<SlotWindow, CoreError> {
        slot_window(self.weekday, &self.start, &self.end, min_duration_minutes)
    }
}

/// DTO for updating a slot. The window is replaced as a whole.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSlot {
    #[serde(alias = "week_day")]
    pub weekday: Option<i16>,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    /// If `Some`, replaces all machine associations. If `None`, leaves unchanged.
    pub machine_ids: Option<Vec<DbId>>,
}

impl UpdateSlot {
    /// Validate the window, see [`validate_slot`].
    pub fn window(&self, min_duration_minutes: u32) -> Result<SlotWindow, CoreError> {
        slot_window(self.weekday, &self.start, &self.end, min_duration_minutes)
    }
}

fn slot_window(
    weekday: Option<i16>,
    start: &str,
    end: &str,
    min_duration_minutes: u32,
) -> Result<SlotWindow, CoreError> {
    let weekday = require(weekday, "weekday")?;
    validate_slot(weekday, start, end, min_duration_minutes)
}
